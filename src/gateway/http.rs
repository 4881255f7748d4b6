//! HTTP transport for the request gateway. Each operation is a JSON `POST`
//! to `{base}/{operation}`; the backend answers with an envelope
//! `{"Success": bool, "Message": string, "Data": object}`.

use super::{Outcome, Payload, Transport};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL or the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).context("invalid API base URL")?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "unsupported API base URL scheme: {}",
                base_url.scheme()
            ));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// URL for a named operation. The operation is appended as a path
    /// segment; a query on the base URL is kept, a fragment is dropped.
    #[must_use]
    pub fn endpoint(&self, operation: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        // http(s) URLs always have a path to extend
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(operation.trim_start_matches('/'));
        }
        url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, operation: &str, payload: &Payload) -> Outcome<Value> {
        let url = self.endpoint(operation);
        debug!(url = %url, "sending request");

        let response = match self.client.post(url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => return Outcome::TransportError(describe_request_error(&err)),
        };

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Outcome::ClientError(sanitize_body(&body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Outcome::TransportError(format!(
                "Request failed ({}): {}",
                status.as_u16(),
                sanitize_body(&body)
            ));
        }

        match response.json::<Envelope>().await {
            Ok(envelope) => interpret(status, envelope),
            Err(err) => Outcome::TransportError(format!("Failed to decode response: {err}")),
        }
    }
}

fn interpret(status: StatusCode, envelope: Envelope) -> Outcome<Value> {
    debug!(status = status.as_u16(), success = envelope.success, "response decoded");
    if envelope.success {
        Outcome::Success(envelope.data)
    } else {
        let message = envelope.message.unwrap_or_default();
        Outcome::ClientError(sanitize_body(&message))
    }
}

fn describe_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out. Please try again.".to_string()
    } else {
        format!("Unable to reach the server: {err}")
    }
}

/// Trims and truncates error bodies before they reach the user.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
