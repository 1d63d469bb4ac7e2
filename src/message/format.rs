//! Markdown body of the Discord message.

use std::fmt::Write;

use crate::payload::{render_value, AlertPayload};

use super::pattern::FieldPatterns;

/// Build the message for `alert`, listing every result field selected by `patterns`.
///
/// ```text
/// # [search_name](results_link) from `server_host`
/// **Alert Fields**
/// - **key:** value
/// ---
/// ```
///
/// Fields appear in result order; a field is listed at most once no
/// matter how many patterns select it.
#[must_use]
pub fn format_message(alert: &AlertPayload, patterns: &FieldPatterns) -> String {
    let mut message = String::new();

    // write! to String is infallible (only fails on OOM which is unrecoverable)
    let _ = writeln!(
        message,
        "# [{}]({}) from `{}`",
        alert.search_name, alert.results_link, alert.server_host
    );
    message.push_str("**Alert Fields**\n");

    for (key, value) in &alert.result {
        if patterns.find_match(key).is_some() {
            let _ = writeln!(message, "- **{key}:** {}", render_value(value));
        }
    }

    message.push_str("---\n");
    message
}
