//! Typed view of the JSON document Splunk writes to the alert action's stdin.
//!
//! The payload is decoded leniently into [`RawPayload`] (every key
//! optional) and then checked into an [`AlertPayload`], so a missing key
//! surfaces as [`AlertError::MissingField`] with its dotted path instead of
//! a generic decode error. Keys this action does not use (`sid`, `owner`,
//! `app`, `session_key`, ...) are ignored.
//!
//! `configuration.field_names` is kept as a raw JSON value: splitting it
//! into patterns is a recoverable step owned by the command layer.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AlertError;

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default)]
    search_name: Option<Value>,
    #[serde(default)]
    results_link: Option<Value>,
    #[serde(default)]
    server_host: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    configuration: Option<RawConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    webhook_url: Option<Value>,
    #[serde(default)]
    field_names: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct AlertPayload {
    pub search_name: String,
    pub results_link: String,
    pub server_host: String,
    /// First result row; iteration follows the order of the input document.
    pub result: Map<String, Value>,
    pub configuration: Configuration,
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub webhook_url: String,
    pub field_names: Value,
}

impl AlertPayload {
    pub fn from_json(input: &str) -> Result<Self, AlertError> {
        let raw: RawPayload =
            serde_json::from_str(input).map_err(|source| AlertError::PayloadParse { source })?;

        let configuration = raw.configuration.ok_or(AlertError::MissingField {
            field: "configuration",
        })?;

        Ok(Self {
            search_name: require_string(raw.search_name, "search_name")?,
            results_link: require_string(raw.results_link, "results_link")?,
            server_host: require_string(raw.server_host, "server_host")?,
            result: require_object(raw.result, "result")?,
            configuration: Configuration {
                webhook_url: require_string(
                    configuration.webhook_url,
                    "configuration.webhook_url",
                )?,
                field_names: configuration.field_names.ok_or(AlertError::MissingField {
                    field: "configuration.field_names",
                })?,
            },
        })
    }
}

fn require_string(value: Option<Value>, field: &'static str) -> Result<String, AlertError> {
    match value {
        None => Err(AlertError::MissingField { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AlertError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn require_object(
    value: Option<Value>,
    field: &'static str,
) -> Result<Map<String, Value>, AlertError> {
    match value {
        None => Err(AlertError::MissingField { field }),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(AlertError::InvalidField {
            field,
            expected: "an object",
        }),
    }
}

/// Render a result value the way it appears in the Discord message.
///
/// Strings are emitted verbatim and `null` as nothing. Multivalue fields
/// arrive as arrays and are joined with `", "`.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
