//! Markup for the content region.
//!
//! Every view is an HTML string handed to the viewport. Post bodies are
//! converted with `comrak` and sanitized with `ammonia` before they leave
//! this module; static page fragments are same-origin authored content and
//! pass through untouched.

use std::fmt::Write;

use comrak::{Options, markdown_to_html};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::manifest::PostSummary;
use crate::route::Route;

/// Shown in place of a preview that has not been loaded yet.
pub const PREVIEW_PLACEHOLDER: &str = "Loading preview...";

/// Post list in manifest order.
///
/// `preview` returns the cached preview for a filename, if any.
pub fn render_posts_list<F>(posts: &[PostSummary], preview: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut html = String::from(r#"<div class="posts-list">"#);

    for (index, post) in posts.iter().enumerate() {
        let href = Route::Post(post.filename.clone())
            .to_hash()
            .unwrap_or_default();
        let preview = preview(&post.filename);
        let preview = preview.as_deref().unwrap_or(PREVIEW_PLACEHOLDER);

        let _ = write!(
            html,
            concat!(
                r#"<article class="post-entry" style="--animation-order: {index}">"#,
                r#"<a href="{href}" class="post-title">{title}</a>"#,
                r#"<div class="post-meta">{meta}</div>"#,
                r#"<div class="post-preview">{preview}</div>"#,
                "</article>"
            ),
            index = index,
            href = encode_double_quoted_attribute(&href),
            title = encode_text(&post.title),
            meta = encode_text(&post_meta(post)),
            preview = encode_text(preview),
        );
    }

    html.push_str("</div>");
    html
}

/// Meta line for a post, e.g. `2024-01-01 • 3 min read`.
pub fn post_meta(post: &PostSummary) -> String {
    format!("{} • {} min read", post.date, post.reading_time)
}

/// Convert Markdown to HTML with unsafe markup removed.
///
/// Supports strikethrough, tables and footnotes. Raw HTML in the source is
/// never trusted: the output always goes through `ammonia`.
pub fn render_post(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.footnotes = true;

    let html = markdown_to_html(markdown, &options);
    let clean = ammonia::clean(&html);
    format!(r#"<article class="post-content">{}</article>"#, clean)
}

/// Static page fragment, inserted as-is.
pub fn render_page(html: &str) -> String {
    html.to_string()
}

pub fn render_loading() -> String {
    r#"<div class="loading fade-in">Loading...</div>"#.to_string()
}

pub fn render_not_found() -> String {
    concat!(
        r#"<div class="not-found fade-in">"#,
        "<h2>Page Not Found</h2>",
        "<p>The page you're looking for doesn't exist.</p>",
        r##"<a href="#posts">Return to Posts</a>"##,
        "</div>"
    )
    .to_string()
}

/// Generic load failure, e.g. `render_error("posts", err.summary())`.
///
/// `summary` is a short description; request detail belongs in the log.
pub fn render_error(what: &str, summary: &str) -> String {
    format!(
        r#"<div class="error-message fade-in">Unable to load {}. {}</div>"#,
        encode_text(what),
        encode_text(summary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(filename: &str, title: &str) -> PostSummary {
        PostSummary {
            filename: filename.to_string(),
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            reading_time: 3,
        }
    }

    #[test]
    fn test_posts_list() {
        let posts = vec![summary("a.md", "A"), summary("b.md", "B")];
        let html = render_posts_list(&posts, |f| (f == "a.md").then(|| "Hello world.".to_string()));

        assert!(html.contains(r##"<a href="#post/a.md" class="post-title">A</a>"##));
        assert!(html.contains(r#"<div class="post-meta">2024-01-01 • 3 min read</div>"#));
        assert!(html.contains(r#"<div class="post-preview">Hello world.</div>"#));
        assert!(html.contains(&format!(r#"<div class="post-preview">{}</div>"#, PREVIEW_PLACEHOLDER)));
        assert!(html.contains("--animation-order: 1"));
        // Manifest order
        assert!(html.find("#post/a.md").unwrap() < html.find("#post/b.md").unwrap());
    }

    #[test]
    fn test_posts_list_escapes_manifest_text() {
        let posts = vec![summary("x\".md", "<b>Bold</b> & co")];
        let html = render_posts_list(&posts, |_| Some("<script>".to_string()));

        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; co"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("x\".md"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_posts_list(&[], |_| None), r#"<div class="posts-list"></div>"#);
    }

    #[test]
    fn test_post_markdown() {
        let html = render_post("# Hi\nHello **world**.");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<strong>world</strong>"));
    }

    #[test]
    fn test_post_sanitized() {
        let html = render_post(
            "<script>alert(1)</script>\n\n[click](javascript:alert(1))\n\n<img src=x onerror=alert(1)>",
        );
        assert!(!html.contains("<script"));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn test_page_passthrough() {
        let fragment = r#"<section class="about"><h2>About</h2></section>"#;
        assert_eq!(render_page(fragment), fragment);
    }

    #[test]
    fn test_fallback_views() {
        assert!(render_not_found().contains(r##"href="#posts""##));
        assert_eq!(
            render_error("posts", "Please try again later."),
            r#"<div class="error-message fade-in">Unable to load posts. Please try again later.</div>"#
        );
    }
}
