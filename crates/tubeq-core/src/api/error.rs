//! Error taxonomy for the backend API client.

use thiserror::Error;

/// Errors surfaced by submit, refresh, and fetch.
///
/// Validation failures are raised locally, before any network call.
/// `Server` carries the backend's response body verbatim so the message can
/// be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True when the error was raised locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
