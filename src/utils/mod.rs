//! Browser adapters for the core router.
//!
//! Provides:
//! - [`BrowserSource`] - Content fetching through `window.fetch`
//! - [`BrowserHistory`] - History/fragment access
//! - [`dom::on_hash_change`], [`dom::register_service_worker`] - Global hooks

pub mod dom;
mod fetch;

pub use dom::BrowserHistory;
pub use fetch::BrowserSource;
