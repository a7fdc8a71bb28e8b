//! Navigation state machine.
//!
//! A navigation classifies a fragment into a [`Route`], acquires the
//! content (through the [`PostCache`] for posts), renders it into the
//! [`Viewport`] and records the canonical fragment in [`HistoryStack`].
//!
//! # Overlapping navigations
//!
//! All methods take `&self`, so a second navigation may start while the
//! first is still fetching. Each one renders when its own fetch completes;
//! nothing is cancelled, so a slow earlier navigation can overwrite a later
//! one. Setting [`SiteConfig::sequence_navigations`] gives every navigation
//! a generation number and drops results that are no longer the newest.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::StreamExt;
use futures::stream;

use crate::cache::{CachedPost, PostCache};
use crate::config::SiteConfig;
use crate::error::{FetchError, LoadError};
use crate::fetch::ContentSource;
use crate::log;
use crate::manifest::Manifest;
use crate::render;
use crate::route::Route;

// ============================================================================
// Collaborators
// ============================================================================

/// The content region the router renders into.
pub trait Viewport {
    /// Replace the region's markup.
    fn show(&self, markup: String);
    /// A navigation started; the region may fade out.
    fn begin_transition(&self);
    /// No navigation is pending any more; the region may fade in.
    fn end_transition(&self);
}

/// Browser history, addressed by fragment (without `#`).
pub trait HistoryStack {
    fn current_fragment(&self) -> String;
    /// Add a history entry.
    fn push_fragment(&self, fragment: &str);
    /// Rewrite the current entry in place.
    fn replace_fragment(&self, fragment: &str);
}

// ============================================================================
// NavigationState
// ============================================================================

/// What the content region currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Route of the view on screen, [`Route::Unknown`] while the not-found
    /// view is shown; `None` until the first navigation completes.
    pub route: Option<Route>,
    /// Navigations started but not yet finished.
    pub pending: usize,
}

impl NavigationState {
    pub fn is_unresolved(&self) -> bool {
        self.route.is_none()
    }

    /// Whether a content transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.pending > 0
    }
}

/// How a navigation ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Content rendered and history updated
    Rendered(Route),
    /// Load failed; a fallback view was rendered
    Failed(Route, LoadError),
    /// Fragment matched nothing; not-found view rendered, history untouched
    NotFound(String),
    /// A newer navigation started first; nothing was rendered
    Superseded(Route),
}

// ============================================================================
// Router
// ============================================================================

/// Owns the post cache and drives every navigation.
pub struct Router<S, V, H> {
    config: SiteConfig,
    source: S,
    viewport: V,
    history: H,
    cache: PostCache,
    state: RefCell<NavigationState>,
    generation: Cell<u64>,
}

impl<S, V, H> Router<S, V, H>
where
    S: ContentSource,
    V: Viewport,
    H: HistoryStack,
{
    pub fn new(config: SiteConfig, source: S, viewport: V, history: H) -> Self {
        Self {
            config,
            source,
            viewport,
            history,
            cache: PostCache::new(),
            state: RefCell::new(NavigationState::default()),
            generation: Cell::new(0),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Navigate to whatever the address bar currently holds.
    pub async fn start(&self) -> Navigation {
        log::info("Initializing application...");
        let fragment = self.history.current_fragment();
        self.navigate(&fragment).await
    }

    /// Navigate to `fragment` (without the `#`).
    ///
    /// Failures never escape: every outcome renders a view.
    pub async fn navigate(&self, fragment: &str) -> Navigation {
        let route = Route::from_fragment(fragment, &self.config.static_pages);
        let ticket = self.begin();

        let result = match &route {
            Route::Unknown(fragment) => Err(LoadError::NotFound(fragment.clone())),
            Route::PostsList => self.load_posts_list().await,
            Route::Post(filename) => {
                self.viewport.show(render::render_loading());
                self.load_post(filename).await
            }
            Route::Page(name) => {
                self.viewport.show(render::render_loading());
                self.load_page(name).await
            }
        };

        if !self.is_latest(ticket) {
            log::info(&format!("Dropping superseded navigation to {}", route));
            self.finish();
            return Navigation::Superseded(route);
        }

        let outcome = match result {
            Ok(markup) => {
                self.viewport.show(markup);
                self.commit(&route);
                Navigation::Rendered(route)
            }
            Err(LoadError::NotFound(fragment)) if matches!(route, Route::Unknown(_)) => {
                log::warn(&format!("No route for '{}'", fragment));
                self.viewport.show(render::render_not_found());
                self.commit(&route);
                Navigation::NotFound(fragment)
            }
            Err(err) => {
                log::error(&format!("Error loading {}: {}", route, err));
                self.viewport.show(Self::fallback_view(&route, &err));
                self.commit(&route);
                Navigation::Failed(route, err)
            }
        };

        self.finish();
        outcome
    }

    /// Fetch every listed post not yet cached, at most
    /// `prefetch_concurrency` at a time.
    ///
    /// If the post list is on screen once all fetches are done, it is
    /// re-rendered so the new previews appear.
    pub async fn prefetch(&self) {
        let manifest = match self.fetch_manifest().await {
            Ok(manifest) => manifest,
            Err(e) => {
                log::error(&format!("Error prefetching posts: {}", e));
                return;
            }
        };

        let limit = self.config.prefetch_concurrency.max(1);
        stream::iter(manifest.iter().filter(|p| !self.cache.contains(&p.filename)))
            .map(|post| async move { (post, self.cached_post(&post.filename).await) })
            .buffer_unordered(limit)
            .for_each(|(post, result)| {
                if let Err(e) = result {
                    log::warn(&format!("Error prefetching {}: {}", post.filename, e));
                }
                async {}
            })
            .await;

        let state = self.state();
        if state.route == Some(Route::PostsList) && !state.is_transitioning() {
            self.viewport.show(self.posts_list_view(&manifest));
        }
    }

    // ------------------------------------------------------------------------
    // Content acquisition
    // ------------------------------------------------------------------------

    async fn fetch_manifest(&self) -> Result<Manifest, FetchError> {
        self.source.fetch_json(&self.config.manifest_path).await
    }

    /// Manifest is fetched on every list view; only posts are cached.
    async fn load_posts_list(&self) -> Result<String, LoadError> {
        let manifest = self.fetch_manifest().await?;
        Ok(self.posts_list_view(&manifest))
    }

    async fn load_post(&self, filename: &str) -> Result<String, LoadError> {
        let post = self.cached_post(filename).await?;
        Ok(render::render_post(&post.content))
    }

    async fn load_page(&self, name: &str) -> Result<String, LoadError> {
        let html = self.source.fetch_text(&self.config.page_path(name)).await?;
        Ok(render::render_page(&html))
    }

    async fn cached_post(&self, filename: &str) -> Result<Rc<CachedPost>, FetchError> {
        self.cache
            .get_or_load(filename, || async {
                let content = self
                    .source
                    .fetch_text(&self.config.post_path(filename))
                    .await?;
                Ok::<_, FetchError>(CachedPost::from_markdown(
                    content,
                    self.config.preview_length,
                ))
            })
            .await
    }

    fn posts_list_view(&self, manifest: &Manifest) -> String {
        render::render_posts_list(manifest, |filename| self.cache.preview(filename))
    }

    /// Static pages that fail to load read as missing; everything else
    /// gets the generic message.
    fn fallback_view(route: &Route, err: &LoadError) -> String {
        match route {
            Route::PostsList => render::render_error("posts", err.summary()),
            Route::Post(_) => render::render_error("post", err.summary()),
            Route::Page(_) | Route::Unknown(_) => render::render_not_found(),
        }
    }

    // ------------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------------

    fn begin(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        self.state.borrow_mut().pending += 1;
        self.viewport.begin_transition();
        ticket
    }

    fn is_latest(&self, ticket: u64) -> bool {
        !self.config.sequence_navigations || ticket == self.generation.get()
    }

    fn finish(&self) {
        let idle = {
            let mut state = self.state.borrow_mut();
            state.pending = state.pending.saturating_sub(1);
            state.pending == 0
        };
        if idle {
            self.viewport.end_transition();
        }
    }

    /// Record the route as displayed and make the address bar show its
    /// canonical fragment. Unknown routes are recorded but never enter
    /// history.
    ///
    /// An alias of the current entry (`""` for `posts`) is rewritten in
    /// place; an identical entry is left alone so hash-change navigations
    /// do not duplicate history.
    fn commit(&self, route: &Route) {
        self.state.borrow_mut().route = Some(route.clone());

        let Some(canonical) = route.fragment() else {
            return;
        };

        let current = self.history.current_fragment();
        if current == canonical {
            return;
        }

        if Route::from_fragment(&current, &self.config.static_pages) == *route {
            self.history.replace_fragment(&canonical);
        } else {
            self.history.push_fragment(&canonical);
        }
    }
}
