//! Enforces Discord's message length ceiling.

use crate::logging::DEBUG_TARGET;

/// Maximum length of a Discord message `content`, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Appended to a message that had to be cut.
pub const TRUNCATION_SUFFIX: &str = "\n...View the alert for more information";

/// Cut `message` to at most [`MAX_MESSAGE_CHARS`] characters.
///
/// A message that fits is returned unchanged. Otherwise it is cut after
/// `MAX_MESSAGE_CHARS - len(TRUNCATION_SUFFIX)` characters and the suffix
/// is appended, giving exactly `MAX_MESSAGE_CHARS`. The cut is by raw
/// character count and may split a word or a Markdown token.
#[must_use]
pub fn trim_message(message: String) -> String {
    let length = message.chars().count();
    if length <= MAX_MESSAGE_CHARS {
        return message;
    }

    tracing::debug!(target: DEBUG_TARGET, length, "Message length is too long");

    let keep = MAX_MESSAGE_CHARS - TRUNCATION_SUFFIX.chars().count();
    let cut = message
        .char_indices()
        .nth(keep)
        .map_or(message.len(), |(idx, _)| idx);

    let mut trimmed = String::with_capacity(cut + TRUNCATION_SUFFIX.len());
    trimmed.push_str(&message[..cut]);
    trimmed.push_str(TRUNCATION_SUFFIX);

    tracing::debug!(
        target: DEBUG_TARGET,
        length = trimmed.chars().count(),
        "New length."
    );
    trimmed
}
