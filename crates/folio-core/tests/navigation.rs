//! End-to-end navigation scenarios against in-memory collaborators.

use folio_core::mock::{MockHistory, MockSource, MockViewport};
use folio_core::render::{render_error, render_not_found};
use folio_core::{FetchError, HistoryStack, LoadError, Navigation, Route, Router, SiteConfig};

type TestRouter = Router<MockSource, MockViewport, MockHistory>;

const MANIFEST: &str =
    r#"[{"filename": "a.md", "title": "A", "date": "2024-01-01", "readingTime": 3}]"#;

fn blog() -> MockSource {
    MockSource::new()
        .with_text("posts/index.json", MANIFEST)
        .with_text("posts/a.md", "# Hi\nHello **world**.")
        .with_text("posts/b.md", "# B\nSecond post.")
        .with_text("pages/about.html", "<h2>About</h2>")
}

fn router_with(config: SiteConfig, source: MockSource, fragment: &str) -> TestRouter {
    Router::new(config, source, MockViewport::new(), MockHistory::new(fragment))
}

fn router(source: MockSource, fragment: &str) -> TestRouter {
    router_with(SiteConfig::default(), source, fragment)
}

#[tokio::test]
async fn test_list_view_after_prefetch() {
    let router = router(blog(), "");

    router.prefetch().await;
    let outcome = router.start().await;

    assert_eq!(outcome, Navigation::Rendered(Route::PostsList));
    let html = router.viewport().last().unwrap();
    assert!(html.contains(">A</a>"));
    assert!(html.contains("2024-01-01 • 3 min read"));
    assert!(html.contains(r#"<div class="post-preview">Hello world.</div>"#));
    assert_eq!(router.history().current_fragment(), "posts");
}

#[tokio::test]
async fn test_list_fetches_manifest_every_time() {
    let router = router(blog(), "");

    router.navigate("posts").await;
    router.navigate("posts").await;

    assert_eq!(router.source().request_count("posts/index.json"), 2);
}

#[tokio::test]
async fn test_manifest_server_error() {
    let source = blog().with_status("posts/index.json", 500);
    let router = router(source, "about");

    router.navigate("about").await;
    let outcome = router.navigate("posts").await;

    assert_eq!(
        outcome,
        Navigation::Failed(Route::PostsList, LoadError::Fetch(FetchError::Status(500)))
    );
    assert_eq!(
        router.viewport().last(),
        Some(render_error("posts", "Please try again later."))
    );
    assert!(!router.state().is_transitioning());
}

#[tokio::test]
async fn test_malformed_manifest() {
    let source = blog().with_text("posts/index.json", "{not json");
    let router = router(source, "");

    let outcome = router.navigate("").await;

    assert!(matches!(
        outcome,
        Navigation::Failed(Route::PostsList, LoadError::Fetch(FetchError::Parse(_)))
    ));
    let html = router.viewport().last().unwrap();
    assert_eq!(html, render_error("posts", "The content could not be read."));
    assert!(!html.contains("line 1"));
}

#[tokio::test]
async fn test_post_network_error() {
    let source = blog().with_network_error("posts/a.md", "offline");
    let router = router(source, "posts");

    router.navigate("post/a.md").await;

    assert_eq!(
        router.viewport().last(),
        Some(render_error("post", "Please try again later."))
    );
    assert!(!router.viewport().last().unwrap().contains("offline"));
    assert!(!router.cache().contains("a.md"));
}

#[tokio::test]
async fn test_unknown_fragment_keeps_history() {
    let router = router(blog(), "posts");

    let outcome = router.navigate("unknown-page").await;

    assert_eq!(outcome, Navigation::NotFound("unknown-page".to_string()));
    assert_eq!(router.viewport().last(), Some(render_not_found()));
    assert_eq!(router.history().entries(), vec!["posts".to_string()]);
    assert!(!router.history().entries().contains(&"unknown-page".to_string()));
}

#[tokio::test]
async fn test_prefetch_keeps_not_found_view() {
    let router = router(blog().with_delay("posts/a.md", 3), "posts");

    router.navigate("posts").await;
    let (_, outcome) = tokio::join!(router.prefetch(), router.navigate("unknown-page"));

    assert_eq!(outcome, Navigation::NotFound("unknown-page".to_string()));
    assert_eq!(router.viewport().last(), Some(render_not_found()));
    assert_eq!(
        router.state().route,
        Some(Route::Unknown("unknown-page".to_string()))
    );
    assert!(router.cache().contains("a.md"));
}

#[tokio::test]
async fn test_prefetch_refreshes_list_on_return() {
    let router = router(blog(), "posts");

    router.navigate("unknown-page").await;
    router.navigate("posts").await;
    router.prefetch().await;

    let html = router.viewport().last().unwrap();
    assert!(html.contains("Hello world."));
}

#[tokio::test]
async fn test_post_view_sanitized() {
    let source = blog().with_text("posts/x.md", "Hi <script>alert(1)</script>");
    let router = router(source, "");

    router.navigate("post/x.md").await;

    let html = router.viewport().last().unwrap();
    assert!(!html.contains("<script"));
}

#[tokio::test]
async fn test_history_round_trip() {
    let router = router(blog(), "");

    router.start().await;
    router.navigate("post/a.md").await;
    router.navigate("about").await;

    assert_eq!(
        router.history().entries(),
        vec![
            "posts".to_string(),
            "post/a.md".to_string(),
            "about".to_string()
        ]
    );
}

#[tokio::test]
async fn test_hash_change_does_not_duplicate_history() {
    let router = router(blog(), "posts");

    // The browser already moved the address bar before the event fired.
    router.history().set_address("post/b.md");
    router.navigate("post/b.md").await;

    assert_eq!(
        router.history().entries(),
        vec!["posts".to_string(), "post/b.md".to_string()]
    );
}

#[tokio::test]
async fn test_renavigation_reuses_cache() {
    let router = router(blog(), "");

    router.navigate("post/a.md").await;
    let first = router.viewport().last();
    router.navigate("post/a.md").await;

    assert_eq!(router.viewport().last(), first);
    assert_eq!(router.source().request_count("posts/a.md"), 1);
}

#[tokio::test]
async fn test_overlapping_navigations_last_completion_wins() {
    let source = blog()
        .with_delay("posts/a.md", 5)
        .with_delay("posts/b.md", 1);
    let router = router(source, "posts");

    let (first, second) =
        tokio::join!(router.navigate("post/a.md"), router.navigate("post/b.md"));

    assert_eq!(first, Navigation::Rendered(Route::Post("a.md".to_string())));
    assert_eq!(second, Navigation::Rendered(Route::Post("b.md".to_string())));
    let html = router.viewport().last().unwrap();
    assert!(html.contains("Hello <strong>world</strong>."));
    assert_eq!(router.viewport().transitions(), (2, 1));
}

#[tokio::test]
async fn test_sequenced_navigations_drop_stale_results() {
    let config = SiteConfig {
        sequence_navigations: true,
        ..SiteConfig::default()
    };
    let source = blog()
        .with_delay("posts/a.md", 5)
        .with_delay("posts/b.md", 1);
    let router = router_with(config, source, "posts");

    let (first, second) =
        tokio::join!(router.navigate("post/a.md"), router.navigate("post/b.md"));

    assert_eq!(first, Navigation::Superseded(Route::Post("a.md".to_string())));
    assert_eq!(second, Navigation::Rendered(Route::Post("b.md".to_string())));
    assert!(router.viewport().last().unwrap().contains("Second post."));
    assert_eq!(router.history().current_fragment(), "post/b.md");
    // The slow response still lands in the cache.
    assert!(router.cache().contains("a.md"));
}

fn three_slow_posts() -> MockSource {
    MockSource::new()
        .with_text(
            "posts/index.json",
            r#"[
                {"filename": "a.md", "title": "A", "date": "d", "readingTime": 1},
                {"filename": "b.md", "title": "B", "date": "d", "readingTime": 1},
                {"filename": "c.md", "title": "C", "date": "d", "readingTime": 1}
            ]"#,
        )
        .with_text("posts/a.md", "alpha")
        .with_text("posts/b.md", "beta")
        .with_text("posts/c.md", "gamma")
        .with_delay("posts/a.md", 3)
        .with_delay("posts/b.md", 3)
        .with_delay("posts/c.md", 3)
}

#[tokio::test]
async fn test_prefetch_respects_concurrency_cap() {
    let config = SiteConfig {
        prefetch_concurrency: 1,
        ..SiteConfig::default()
    };
    let router = router_with(config, three_slow_posts(), "");

    router.prefetch().await;

    assert_eq!(router.source().peak_in_flight(), 1);
    assert_eq!(router.cache().len(), 3);
}

#[tokio::test]
async fn test_prefetch_fans_out_up_to_cap() {
    let config = SiteConfig {
        prefetch_concurrency: 2,
        ..SiteConfig::default()
    };
    let router = router_with(config, three_slow_posts(), "");

    router.prefetch().await;

    assert_eq!(router.source().peak_in_flight(), 2);
    assert_eq!(router.cache().len(), 3);
}

#[tokio::test]
async fn test_prefetch_skips_cached_posts() {
    let router = router(blog(), "");

    router.navigate("post/a.md").await;
    router.prefetch().await;

    assert_eq!(router.source().request_count("posts/a.md"), 1);
}
