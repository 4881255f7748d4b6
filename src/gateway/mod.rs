//! Uniform asynchronous call against named backend operations. Each call
//! resolves to exactly one [`Outcome`]; cleanup that must always run is scoped
//! by the caller with [`crate::ui::LoadingGuard`]. Payload values may hold
//! credentials and are never logged.

mod http;

pub use http::{DEFAULT_TIMEOUT, HttpTransport};

use crate::ui::Ui;
use serde::Serialize;
use serde_json::Value;
use std::{collections::BTreeMap, fmt, future::Future, sync::Arc};
use tracing::{Instrument, debug, info_span, warn};
use ulid::Ulid;

/// Message shown for transport failures when the call is not silent.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Result of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// The backend rejected the request (e.g. bad credentials, expired token).
    ClientError(String),
    /// Network failure, timeout, server fault or undecodable response.
    TransportError(String),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::ClientError(message) => Outcome::ClientError(message),
            Self::TransportError(message) => Outcome::TransportError(message),
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::ClientError(_) => "client_error",
            Self::TransportError(_) => "transport_error",
        }
    }
}

/// String-keyed request body.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

/// Sends one operation to the backend.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        operation: &str,
        payload: &Payload,
    ) -> impl Future<Output = Outcome<Value>> + Send;
}

/// Dispatches backend calls and surfaces generic failure notifications.
pub struct RequestGateway<T> {
    transport: T,
    ui: Arc<dyn Ui>,
}

impl<T: Transport> RequestGateway<T> {
    pub fn new(transport: T, ui: Arc<dyn Ui>) -> Self {
        Self { transport, ui }
    }

    /// Performs `operation` with `payload`.
    ///
    /// Unless `silent` is set, a transport failure also shows a generic
    /// error through the [`Ui`]. Client errors are never shown here; the
    /// caller's handling of the returned outcome is their only feedback path.
    pub async fn request(&self, operation: &str, payload: &Payload, silent: bool) -> Outcome<Value> {
        let request_id = Ulid::new();
        let span = info_span!("gateway.request", operation, %request_id);

        let outcome = self
            .transport
            .send(operation, payload)
            .instrument(span.clone())
            .await;

        span.in_scope(|| match &outcome {
            Outcome::Success(_) => debug!(outcome = outcome.kind(), "request finished"),
            Outcome::ClientError(message) | Outcome::TransportError(message) => {
                warn!(outcome = outcome.kind(), message = %message, "request failed");
            }
        });

        // Client errors are left to the caller's own handling
        if !silent && matches!(outcome, Outcome::TransportError(_)) {
            self.ui.show_error(TRANSPORT_ERROR_MESSAGE);
        }

        outcome
    }
}

impl<T: fmt::Debug> fmt::Debug for RequestGateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestGateway")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
