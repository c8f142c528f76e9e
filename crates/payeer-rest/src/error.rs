//! Error types for REST API operations

use crate::types::Params;

/// Errors that can occur at the HTTP transport layer
///
/// Kept separate from [`RestError::Api`] so callers can tell a network
/// failure apart from a server-side rejection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// API returned an envelope with `success != true`
    #[error("API error: {code}")]
    Api {
        /// Error code reported by the server (empty if absent)
        code: String,
        /// Full `error` object from the envelope
        details: Params,
    },

    /// Network or HTTP-layer failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Failed to encode a request or decode a response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Get the server error code, if this is an API error
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
