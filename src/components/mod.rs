//! UI components built with Leptos.
//!
//! - [`SiteHeader`] - Site title and navigation links
//! - [`ContentRegion`] - Region the router renders into

pub mod content;
pub mod header;

pub use content::{ContentRegion, SignalViewport};
pub use header::SiteHeader;
