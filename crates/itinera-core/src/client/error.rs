//! Transport error taxonomy and best-effort error-message extraction.

use thiserror::Error;

/// Errors surfaced by the API transport.
///
/// Plan-fetch callers never see these directly (the store captures them
/// into `plan_error`); chat-send callers do.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status. `message` is extracted best-effort from the
    /// response body's error envelope.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response whose body could not be decoded. The raw decode
    /// failure is kept for debugging but never shown to users.
    #[error("unexpected response from the server")]
    MalformedBody(String),
}

/// Extract a human-readable message from an error response body.
///
/// Checks, in order: the `{"error": {"code", "message"}}` envelope, a
/// top-level `"message"` string, a top-level `"error"` string, then a
/// generic `"API error: {status}"` fallback. Never fails.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
        {
            return message.to_string();
        }
        if let Some(message) = value
            .get("message")
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
        {
            return message.to_string();
        }
        if let Some(message) = value
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
        {
            return message.to_string();
        }
    }
    format!("API error: {status}")
}
