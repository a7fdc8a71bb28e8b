//! Root application module.
//!
//! Contains the main App component and the BlogContext shared by the
//! header and the content region.

use std::rc::Rc;

use folio_core::Router;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::{ContentRegion, SignalViewport, SiteHeader};
use crate::config::site_config;
use crate::utils::{BrowserHistory, BrowserSource, dom};

/// Router wired to the browser.
pub type BlogRouter = Router<BrowserSource, SignalViewport, BrowserHistory>;

// ============================================================================
// BlogContext
// ============================================================================

/// Application-wide context.
///
/// Provided at the root of the component tree and accessed with
/// `use_context::<BlogContext>()`. The router itself is not `Send`, so it
/// is kept in local storage and only its handle is copied around.
#[derive(Clone, Copy)]
pub struct BlogContext {
    router: StoredValue<Rc<BlogRouter>, LocalStorage>,
    /// Content region state rendered by [`ContentRegion`].
    pub view: SignalViewport,
    /// Static pages linked from the header.
    pub pages: StoredValue<Vec<String>>,
}

impl BlogContext {
    pub fn new(router: BlogRouter) -> Self {
        let view = *router.viewport();
        let pages = router.config().static_pages.clone();
        Self {
            router: StoredValue::new_local(Rc::new(router)),
            view,
            pages: StoredValue::new(pages),
        }
    }

    fn router(&self) -> Rc<BlogRouter> {
        self.router.get_value()
    }

    /// Navigate to `fragment` in the background.
    pub fn navigate(&self, fragment: impl Into<String>) {
        let router = self.router();
        let fragment = fragment.into();
        spawn_local(async move {
            router.navigate(&fragment).await;
        });
    }

    /// Render the route in the address bar and, if enabled, start
    /// prefetching posts.
    pub fn start(&self) {
        let router = self.router();

        if router.config().prefetch {
            let prefetcher = Rc::clone(&router);
            spawn_local(async move {
                prefetcher.prefetch().await;
            });
        }

        spawn_local(async move {
            router.start().await;
        });
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Builds the router from the embedded site configuration
/// - Provides the BlogContext
/// - Hooks `hashchange` into navigation
/// - Renders the header and the content region
#[component]
pub fn App() -> impl IntoView {
    let config = site_config();
    let service_worker = config.service_worker.clone();
    let viewport = SignalViewport::new(config.transition_ms);
    let router = Router::new(config, BrowserSource, viewport, BrowserHistory);

    let ctx = BlogContext::new(router);
    provide_context(ctx);

    dom::on_hash_change(move |fragment| ctx.navigate(fragment));
    if let Some(script) = service_worker {
        dom::register_service_worker(&script);
    }
    ctx.start();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="error-message">
                    <p>"Something went wrong. Please try reloading the page."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                </div>
            }
        >
            <SiteHeader />
            <ContentRegion />
        </ErrorBoundary>
    }
}
