//! Unified error type for the alert action.
//!
//! [`AlertError`] covers every way a single invocation can go wrong:
//! reading stdin, decoding the Splunk payload, missing or mistyped keys,
//! an unusable `field_names` setting, and the outbound webhook request.
//! None of these end the process with a failure status; the command layer
//! logs them and exits normally.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AlertError {
    #[error("failed to read alert payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("alert payload is not valid JSON: {source}")]
    PayloadParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("alert payload is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("alert payload field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'field_names' cannot be split on ',': expected a string, found {found}")]
    FieldNamesNotSplittable { found: &'static str },

    #[error("'field_names' is {found} and cannot be matched against result fields")]
    FieldNamesNotIterable { found: &'static str },

    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("webhook did not respond within {}ms", after.as_millis())]
    Timeout { after: Duration },
}

/// Human-readable name of a JSON value's kind, used in error messages.
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
