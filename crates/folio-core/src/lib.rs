//! Platform-independent core of the folio blog.
//!
//! - [`Route`] - URL fragment classification
//! - [`extract_preview`] - Markdown to plain-text excerpts
//! - [`PostCache`] - Session cache of loaded posts
//! - [`render`] - Markup for every content view
//! - [`Router`] - Navigation state machine over [`ContentSource`],
//!   [`Viewport`] and [`HistoryStack`]
//! - [`offline`] - Versioned offline asset cache policy

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod log;
pub mod manifest;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod offline;
pub mod preview;
pub mod render;
pub mod route;
pub mod router;

pub use cache::{CachedPost, PostCache};
pub use config::SiteConfig;
pub use error::{FetchError, LoadError};
pub use fetch::ContentSource;
pub use manifest::{Manifest, PostSummary};
pub use preview::extract_preview;
pub use route::Route;
pub use router::{HistoryStack, Navigation, NavigationState, Router, Viewport};
