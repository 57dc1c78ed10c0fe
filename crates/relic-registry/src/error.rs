//! Registry error types.

use thiserror::Error;

/// Errors that can occur when talking to the registry or GitHub.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote returned a non-success status code.
    #[error("API error ({status}) for {url}: {message}")]
    Api {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Requested URL.
        url: String,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The remote returned a 429 Too Many Requests response.
    #[error("rate limited by {url}; retry after {retry_after_secs}s")]
    RateLimited {
        url: String,
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
