//! Error types for the gateway.

use thiserror::Error;

/// Fallback text when no usable failure description exists.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur while talking to the chat backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport failure (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Backend rejected the request with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Structured server message when one was present, otherwise a
        /// generic status description.
        message: String,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Human-readable failure description for a synthesized assistant
    /// message.
    ///
    /// Prefers the structured server message, then the transport error
    /// description, then a literal fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::HttpRequest(err) => format!("Request failed: {err}"),
            _ => UNKNOWN_ERROR.to_string(),
        }
    }
}
