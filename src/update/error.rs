//! Error types for update checks.

use thiserror::Error;

/// Transport-level failure of an HTTP request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server could not be reached or the transfer broke off.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not answer in time.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Why the latest version could not be determined.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The request itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("Version endpoint returned {0}")]
    Status(http::StatusCode),

    /// The server answered without a version identifier.
    #[error("Version endpoint returned an empty body")]
    EmptyBody,

    /// The version endpoint URL is malformed.
    #[error("Invalid version endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
