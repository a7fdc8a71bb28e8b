//! Offline asset cache policy.
//!
//! Mirrors the lifecycle of a versioned service-worker cache: `install`
//! stores a fixed allow-list of assets under the current version,
//! `activate` purges every other version, and `respond` serves from the
//! store with network fallback. The storage and network are injected so
//! the policy runs the same in a worker and in tests. Bodies are raw
//! bytes, so binary assets are stored and served unaltered.
//!
//! The shipped worker script (`assets/sw.js`) applies this policy with
//! the same version name and asset list.

use crate::error::FetchError;
use crate::fetch::ContentSource;
use crate::log;

/// Name of the current cache version.
pub const CACHE_VERSION: &str = "folio-cache-v1";

/// Assets stored for offline use, as emitted by `trunk build`
/// (`filehash = false`).
pub const PRECACHE_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/bundle.css",
    "/style.css",
    "/folio.js",
    "/folio_bg.wasm",
    "/posts/index.json",
];

/// Named caches of path → body, like the browser Cache Storage API.
#[allow(async_fn_in_trait)]
pub trait AssetStore {
    async fn cache_names(&self) -> Vec<String>;
    async fn put(&self, cache: &str, path: &str, body: Vec<u8>);
    /// Look a path up across all caches.
    async fn lookup(&self, path: &str) -> Option<Vec<u8>>;
    async fn delete(&self, cache: &str);
}

/// Versioned precache.
#[derive(Clone, Debug)]
pub struct OfflineCache {
    version: String,
    assets: Vec<String>,
}

impl Default for OfflineCache {
    fn default() -> Self {
        Self::new(CACHE_VERSION, PRECACHE_ASSETS)
    }
}

impl OfflineCache {
    pub fn new<S: AsRef<str>>(version: &str, assets: &[S]) -> Self {
        Self {
            version: version.to_string(),
            assets: assets.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Fetch every asset, then store them all under the current version.
    ///
    /// Nothing is stored unless every fetch succeeds.
    pub async fn install<St, N>(&self, store: &St, network: &N) -> Result<(), FetchError>
    where
        St: AssetStore,
        N: ContentSource,
    {
        let mut bodies = Vec::with_capacity(self.assets.len());
        for path in &self.assets {
            bodies.push((path, network.fetch_bytes(path).await?));
        }

        for (path, body) in bodies {
            store.put(&self.version, path, body).await;
        }
        Ok(())
    }

    /// Delete every cache whose name is not the current version.
    ///
    /// Returns the deleted names.
    pub async fn activate<St: AssetStore>(&self, store: &St) -> Vec<String> {
        let mut purged = Vec::new();
        for name in store.cache_names().await {
            if name != self.version {
                log::info(&format!("Deleting old cache {}", name));
                store.delete(&name).await;
                purged.push(name);
            }
        }
        purged
    }

    /// Serve `path` from the store, falling back to the network.
    ///
    /// Network responses are returned unaltered and are not stored.
    pub async fn respond<St, N>(
        &self,
        store: &St,
        network: &N,
        path: &str,
    ) -> Result<Vec<u8>, FetchError>
    where
        St: AssetStore,
        N: ContentSource,
    {
        match store.lookup(path).await {
            Some(body) => Ok(body),
            None => network.fetch_bytes(path).await,
        }
    }
}
