//! Plain-text post previews.
//!
//! Strips Markdown markup in a fixed order (each rule sees the output of
//! the previous one), then trims and truncates by characters.

use std::sync::LazyLock;

use regex::Regex;

/// Appended when a preview was truncated.
pub const ELLIPSIS: &str = "...";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+(?:[ \t][^\n]*)?(?:\n|$)").expect("heading pattern"));

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code fence pattern"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("link pattern"));

// Doubled markers go first so `**x**` does not leave `*x*` behind.
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\*\*|__)(.+?)(?:\*\*|__)").expect("strong pattern"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`](.+?)[*_`]").expect("emphasis pattern"));

/// Derive a plain-text excerpt of at most `max_length` characters, plus
/// [`ELLIPSIS`] when the cleaned text was longer.
///
/// Removes heading lines, fenced code blocks, link targets (keeping the
/// label) and inline emphasis/code markers (keeping the inner text).
pub fn extract_preview(markdown: &str, max_length: usize) -> String {
    let text = HEADING.replace_all(markdown, "");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "${1}");
    let text = STRONG.replace_all(&text, "${1}");
    let text = EMPHASIS.replace_all(&text, "${1}");

    truncate(text.trim(), max_length)
}

fn truncate(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}
