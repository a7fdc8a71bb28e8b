//! Site configuration.
//!
//! Centralizes the content locations and navigation tuning used by the
//! router. Every field has a default, so a site file only needs to name
//! what it changes.

use serde::Deserialize;

// =============================================================================
// Defaults
// =============================================================================

/// Directory holding post Markdown files.
pub const DEFAULT_POSTS_DIRECTORY: &str = "posts/";

/// Manifest listing the posts in display order.
pub const DEFAULT_MANIFEST_PATH: &str = "posts/index.json";

/// Directory holding static page HTML fragments.
pub const DEFAULT_PAGES_DIRECTORY: &str = "pages/";

/// Maximum preview length in characters (before the ellipsis).
pub const DEFAULT_PREVIEW_LENGTH: usize = 280;

/// Static pages reachable by fragment.
pub const DEFAULT_STATIC_PAGES: &[&str] = &["about", "contact"];

/// Content fade duration in milliseconds.
pub const DEFAULT_TRANSITION_MS: u32 = 300;

/// Maximum number of post requests in flight while prefetching.
pub const DEFAULT_PREFETCH_CONCURRENCY: usize = 4;

// =============================================================================
// SiteConfig
// =============================================================================

/// Content locations and navigation behavior.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub posts_directory: String,
    pub manifest_path: String,
    pub pages_directory: String,
    pub preview_length: usize,
    pub static_pages: Vec<String>,
    pub transition_ms: u32,
    /// Fetch every listed post at start-up so list previews are ready.
    pub prefetch: bool,
    /// Cap on concurrent prefetch requests (0 is treated as 1).
    pub prefetch_concurrency: usize,
    /// Drop results of navigations superseded by a newer one.
    ///
    /// Off by default: overlapping navigations each render when their own
    /// fetch completes, so a slow earlier one can overwrite a later one.
    pub sequence_navigations: bool,
    /// Offline worker script to register, if any.
    pub service_worker: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_directory: DEFAULT_POSTS_DIRECTORY.to_string(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            pages_directory: DEFAULT_PAGES_DIRECTORY.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            static_pages: DEFAULT_STATIC_PAGES.iter().map(|s| s.to_string()).collect(),
            transition_ms: DEFAULT_TRANSITION_MS,
            prefetch: true,
            prefetch_concurrency: DEFAULT_PREFETCH_CONCURRENCY,
            sequence_navigations: false,
            service_worker: None,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML site file. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Location of a post's Markdown source.
    pub fn post_path(&self, filename: &str) -> String {
        format!("{}{}", self.posts_directory, filename)
    }

    /// Location of a static page fragment.
    pub fn page_path(&self, name: &str) -> String {
        format!("{}{}.html", self.pages_directory, name)
    }

    pub fn is_static_page(&self, name: &str) -> bool {
        self.static_pages.iter().any(|p| p == name)
    }
}
