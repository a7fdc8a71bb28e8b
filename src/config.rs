//! Application configuration.
//!
//! Site metadata lives here as constants; content locations and
//! navigation tuning come from `assets/site.toml`, embedded at compile
//! time using `include_str!`.

use folio_core::{SiteConfig, log};

/// Site configuration file.
const SITE_TOML: &str = include_str!("../assets/site.toml");

/// Site title shown in the header; links back to the post list.
pub const SITE_TITLE: &str = "folio";

/// Load the embedded site configuration.
///
/// An invalid file is logged and the defaults are used instead.
pub fn site_config() -> SiteConfig {
    SiteConfig::from_toml(SITE_TOML).unwrap_or_else(|e| {
        log::error(&format!("Invalid site.toml, using defaults: {}", e));
        SiteConfig::default()
    })
}

/// Navigation label for a static page name (`about` → `About`).
pub fn page_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
