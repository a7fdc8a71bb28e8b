//! Post manifest types.
//!
//! The manifest is a JSON array of post summaries. Array order is display
//! order.

use serde::Deserialize;

/// Manifest entry for one post.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// File name under the posts directory; unique post identifier
    pub filename: String,
    pub title: String,
    /// Display date, shown verbatim
    pub date: String,
    /// Estimated reading time in minutes
    pub reading_time: u32,
}

/// Ordered post listing.
pub type Manifest = Vec<PostSummary>;
