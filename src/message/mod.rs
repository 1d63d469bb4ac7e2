//! Turning an alert into the text posted to Discord.
//!
//! - [`pattern`] -- glob matching of result field names.
//! - [`format`] -- the Markdown body listing the selected fields.
//! - [`trim`] -- the 2000 character ceiling.

pub mod format;
pub mod pattern;
pub mod trim;

use crate::payload::AlertPayload;

pub use format::format_message;
pub use pattern::{FieldPatterns, Pattern};
pub use trim::{trim_message, MAX_MESSAGE_CHARS, TRUNCATION_SUFFIX};

/// Formatted and trimmed message content for `alert`.
#[must_use]
pub fn build(alert: &AlertPayload, patterns: &FieldPatterns) -> String {
    trim_message(format_message(alert, patterns))
}
