//! Delivery of a message to a Discord incoming webhook.
//!
//! [`build_http_client`] creates the rustls-backed hyper client and
//! [`deliver`] performs the single POST an alert results in. The result is
//! classified as a [`DeliveryOutcome`] and logged; it is never retried.
//! Discord answers a successful webhook execution with `204 No Content`,
//! anything else counts as a rejection.

use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, StatusCode};
use http_body_util::Full;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AlertError;
use crate::logging::{DEBUG_TARGET, EVENT_TARGET};

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, Full<Bytes>>;

/// Body of a webhook execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordPayload {
    pub content: String,
}

#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Discord accepted the message (204).
    Delivered,
    /// Discord answered with any other status.
    Rejected { status: StatusCode },
    /// No usable response: bad URL, connection, TLS, timeout.
    Failed { error: AlertError },
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in (e.g. `--all-features`
    // enables both `ring` and `aws-lc-rs`), rustls cannot auto-detect which one
    // to use. Explicitly install `ring` as the default provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new()).build(https)
}

/// Check that `raw` is an absolute `http` or `https` URL.
pub fn validate_webhook_url(raw: &str) -> Result<Url, AlertError> {
    let url = Url::parse(raw).map_err(|e| AlertError::InvalidWebhookUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AlertError::InvalidWebhookUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}

/// POST `payload` to `webhook_url` once and log how it went.
pub async fn deliver(
    client: &HttpClient,
    webhook_url: &str,
    payload: &DiscordPayload,
    timeout: Duration,
) -> DeliveryOutcome {
    match send(client, webhook_url, payload, timeout).await {
        Ok(status) if status == StatusCode::NO_CONTENT => {
            tracing::info!(target: EVENT_TARGET, "Message sent successfully.");
            DeliveryOutcome::Delivered
        }
        Ok(status) => {
            tracing::error!(
                target: EVENT_TARGET,
                status_code = status.as_u16(),
                "Failed to send message."
            );
            DeliveryOutcome::Rejected { status }
        }
        Err(error) => {
            tracing::error!(
                target: EVENT_TARGET,
                error = %error,
                "An error occurred while sending the Discord message."
            );
            DeliveryOutcome::Failed { error }
        }
    }
}

async fn send(
    client: &HttpClient,
    webhook_url: &str,
    payload: &DiscordPayload,
    timeout: Duration,
) -> Result<StatusCode, AlertError> {
    let url = validate_webhook_url(webhook_url)?;
    let uri: hyper::Uri =
        url.as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| AlertError::InvalidWebhookUrl {
                url: webhook_url.to_string(),
                reason: e.to_string(),
            })?;

    let body = serde_json::to_vec(payload).map_err(|e| AlertError::HttpRequest {
        source: Box::new(e),
    })?;
    tracing::debug!(
        target: DEBUG_TARGET,
        payload = %String::from_utf8_lossy(&body),
        "Payload to Discord"
    );

    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| AlertError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(timeout, client.request(req))
        .await
        .map_err(|_| AlertError::Timeout { after: timeout })?
        .map_err(|e| AlertError::HttpRequest {
            source: Box::new(e),
        })?;

    Ok(response.status())
}
