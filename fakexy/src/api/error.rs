//! Error types for the address API client.

use thiserror::Error;

/// Message used when the server reports a failure without saying why.
pub const UNKNOWN_API_ERROR: &str = "Unknown error occurred.";

/// Errors returned by [`ApiClient`](super::ApiClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a usable response (DNS, connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request was rejected before being sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or JSON failure
    Transport,
    /// Non-success HTTP status with a server-supplied message
    Api,
    /// Caller error caught before any I/O
    InvalidRequest,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) | ClientError::Decode(_) => ErrorKind::Transport,
            ClientError::Api { .. } => ErrorKind::Api,
            ClientError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// The inline text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) | ClientError::Decode(_) => "Connection Error".to_string(),
            ClientError::Api { message, .. } => format!("Error: {message}"),
            ClientError::InvalidRequest(message) => format!("Error: {message}"),
        }
    }
}

/// Extract the server's message from a decoded error body.
///
/// Tries `error`, then `message`, then falls back to [`UNKNOWN_API_ERROR`].
pub(crate) fn extract_error_message(body: &serde_json::Value) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|field| body.get(field).and_then(|v| v.as_str()))
        .find(|msg| !msg.is_empty())
        .unwrap_or(UNKNOWN_API_ERROR)
        .to_string()
}
