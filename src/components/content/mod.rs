//! Content region component.
//!
//! Displays whatever markup the router last produced and plays the fade
//! transition between navigations.

use folio_core::Viewport;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::BlogContext;

stylance::import_crate_style!(css, "src/components/content/content.module.css");

/// Delay before fading back in, so the removed class is painted first.
const FADE_RESTART_MS: u32 = 16;

// ============================================================================
// SignalViewport
// ============================================================================

/// [`Viewport`] backed by Leptos signals.
///
/// This struct is `Copy` because all fields are signals or plain values.
#[derive(Clone, Copy)]
pub struct SignalViewport {
    /// Markup of the list/detail container.
    pub markup: RwSignal<String>,
    /// Whether the wrapper carries the fade-in class.
    pub visible: RwSignal<bool>,
    /// Bumped by every fade-out; a delayed fade-in only applies to the
    /// epoch it was scheduled in.
    epoch: StoredValue<u64>,
    /// Fade duration in milliseconds.
    pub transition_ms: u32,
}

impl SignalViewport {
    pub fn new(transition_ms: u32) -> Self {
        Self {
            markup: RwSignal::new(String::new()),
            visible: RwSignal::new(false),
            epoch: StoredValue::new(0),
            transition_ms,
        }
    }

    fn fade_in(&self, epoch: u64) {
        if self.epoch.get_value() == epoch {
            self.visible.set(true);
        }
    }
}

impl Viewport for SignalViewport {
    fn show(&self, markup: String) {
        self.markup.set(markup);
    }

    fn begin_transition(&self) {
        self.epoch.update_value(|epoch| *epoch += 1);
        self.visible.set(false);
    }

    fn end_transition(&self) {
        let viewport = *self;
        let epoch = self.epoch.get_value();
        spawn_local(async move {
            TimeoutFuture::new(FADE_RESTART_MS).await;
            viewport.fade_in(epoch);
        });
    }
}

// ============================================================================
// ContentRegion
// ============================================================================

/// Outer wrapper (fade target) around the list/detail container.
///
/// Links inside the rendered markup are plain `#` anchors; following one
/// fires `hashchange`, which routes through the same navigation path.
#[component]
pub fn ContentRegion() -> impl IntoView {
    let ctx = use_context::<BlogContext>().expect("BlogContext must be provided");
    let view = ctx.view;

    let class = move || {
        if view.visible.get() {
            format!("{} {}", css::content, css::fadeIn)
        } else {
            css::content.to_string()
        }
    };

    view! {
        <main
            id="content"
            class=class
            style=format!("--transition-ms: {}ms", view.transition_ms)
        >
            <div id="posts-list" class=css::container inner_html=move || view.markup.get() />
        </main>
    }
}
