//! `discord-alert-action --execute`: deliver one alert.
//!
//! Reads the Splunk payload from stdin, selects the configured fields,
//! formats and trims the message, and posts it to the webhook. Every
//! failure is logged here; none of them changes the exit status.

use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::error::AlertError;
use crate::logging::{DEBUG_TARGET, EVENT_TARGET};
use crate::message::{self, FieldPatterns};
use crate::payload::AlertPayload;
use crate::webhook::{self, DeliveryOutcome, DiscordPayload, HttpClient};

pub async fn execute(timeout: Duration) {
    tracing::info!(target: EVENT_TARGET, "Running as alert action");

    let client = webhook::build_http_client();
    let result = async {
        let input = read_stdin().await?;
        process_alert(&input, &client, timeout).await
    }
    .await;

    if let Err(e) = result {
        tracing::error!(target: EVENT_TARGET, error = %e, "An error occurred");
    }
}

async fn read_stdin() -> Result<String, AlertError> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}

/// Run the whole pipeline for one raw payload.
///
/// Returns `Err` only when the payload itself is unusable; delivery
/// problems are reported through the returned [`DeliveryOutcome`].
pub async fn process_alert(
    input: &str,
    client: &HttpClient,
    timeout: Duration,
) -> Result<DeliveryOutcome, AlertError> {
    tracing::debug!(target: DEBUG_TARGET, payload = %input, "Payload");

    let alert = AlertPayload::from_json(input)?;
    let patterns = resolve_patterns(&alert.configuration.field_names, !alert.result.is_empty())?;

    tracing::debug!(target: DEBUG_TARGET, field_names = %patterns, "Field Names");
    tracing::debug!(
        target: DEBUG_TARGET,
        webhook_url = %alert.configuration.webhook_url,
        "Alert action webhook URL"
    );
    tracing::debug!(target: DEBUG_TARGET, search_name = %alert.search_name, "Search Name");
    tracing::debug!(target: DEBUG_TARGET, results_link = %alert.results_link, "Results Link");
    tracing::debug!(target: DEBUG_TARGET, server_host = %alert.server_host, "Server Host");
    tracing::debug!(
        target: DEBUG_TARGET,
        results = %serde_json::Value::Object(alert.result.clone()),
        "Available Fields"
    );

    let content = message::build(&alert, &patterns);
    let payload = DiscordPayload { content };

    Ok(webhook::deliver(client, &alert.configuration.webhook_url, &payload, timeout).await)
}

/// Patterns from `field_names`; a value that cannot be split is logged and
/// used as a list directly, which fails only if there are fields to match.
fn resolve_patterns(
    field_names: &serde_json::Value,
    has_fields: bool,
) -> Result<FieldPatterns, AlertError> {
    match FieldPatterns::from_value(field_names) {
        Ok(patterns) => Ok(patterns),
        Err(e) => {
            tracing::error!(target: EVENT_TARGET, error = %e, "Error splitting field names");
            FieldPatterns::salvage(field_names, has_fields)
        }
    }
}
