//! Error types for status collection.

use thiserror::Error;

/// Errors that can occur while fetching and flattening a status document.
///
/// All variants collapse to the same user-visible failure at the binary
/// boundary (one generic line, exit code 2), but the distinguished kind is
/// logged so operators can tell a refused connection from a mangled payload.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The device answered with a non-success HTTP status.
    #[error("HTTP request failed with status {status}")]
    Request { status: u16 },

    /// The request never produced a response (DNS, TCP, TLS).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Authentication was rejected by the device.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The response body was not JSON, or the descriptor/value arrays do
    /// not line up with the shape the descriptors declare.
    #[error("Malformed status document: {0}")]
    MalformedDocument(String),
}

impl CollectorError {
    /// Shorthand for shape mismatches found during flattening.
    pub fn malformed(msg: impl Into<String>) -> Self {
        CollectorError::MalformedDocument(msg.into())
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            CollectorError::Transport(err.to_string())
        } else if err.is_decode() {
            CollectorError::MalformedDocument(err.to_string())
        } else {
            CollectorError::Transport(err.to_string())
        }
    }
}
