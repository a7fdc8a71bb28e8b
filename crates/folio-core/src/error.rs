//! Error types for content loading.
//!
//! - [`FetchError`] - Network/fetch failures for a single request
//! - [`LoadError`] - Failures of a navigation's content acquisition

use thiserror::Error;

/// Network/fetch-related errors for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be created or no browser window is available
    #[error("Fetch unavailable")]
    Unavailable,
    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(String),
    /// Response arrived with a non-2xx status
    #[error("HTTP error: {0}")]
    Status(u16),
    /// Response body was not the expected JSON
    #[error("JSON parse error: {0}")]
    Parse(String),
}

/// Failure of a navigation's content acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Fragment does not name a post, the list or a known page
    #[error("Not found: {0}")]
    NotFound(String),
}

impl LoadError {
    /// Short user-facing description, free of request detail.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Fetch(FetchError::Parse(_)) => "The content could not be read.",
            Self::Fetch(_) => "Please try again later.",
            Self::NotFound(_) => "The page you're looking for doesn't exist.",
        }
    }
}
