/// Error type for API requests
///
/// Errors are converted to plain data at the transport boundary so they can
/// travel inside application messages (which must be `Clone`). Nothing here
/// is fatal: a failed request leaves the last-good state in place.

use thiserror::Error;

/// What went wrong with a request to the photo store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connection refused,
    /// DNS failure, interrupted transfer, ...)
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
