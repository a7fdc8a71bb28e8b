//! Content retrieval seam.
//!
//! The browser implementation lives in the web app; tests use
//! [`crate::mock::MockSource`].

use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Retrieves content by path, one request per call.
///
/// No retries and no deduplication at this layer. Futures need not be
/// `Send`: everything runs on the single UI thread.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Fetch a path as text. Non-2xx responses are [`FetchError::Status`].
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;

    /// Fetch a path as raw bytes, for assets that are not text.
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError>;

    /// Fetch a path and parse it as JSON.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let text = self.fetch_text(path).await?;
        serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
