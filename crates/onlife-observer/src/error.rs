//! Error types for the observer server.
//!
//! [`ObserverError`] covers the REST surface and converts into an Axum
//! response. [`ProtocolError`] is what an observer gets back, privately,
//! when a `WebSocket` command cannot be understood. [`DeliveryError`] marks
//! an observer whose connection can no longer be written to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// An inbound `WebSocket` message that is not a usable command.
///
/// The `Display` text is sent verbatim as the `error` field of the reply.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame is not a JSON object with a string `type`.
    #[error("invalid command: {0}")]
    Invalid(#[from] serde_json::Error),

    /// The `type` field is missing or names no known command.
    #[error("unknown command")]
    UnknownCommand(Option<String>),
}

/// A message could not be handed to an observer's connection.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The connection's writer has shut down.
    #[error("observer disconnected: {0}")]
    Disconnected(String),

    /// The message could not be serialised.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
