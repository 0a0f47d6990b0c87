//! Remote API error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote candidate API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API returned 404 for a candidate or skill.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The configured base URL cannot carry a path.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
