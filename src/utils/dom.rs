//! DOM and Web API utility functions.
//!
//! Provides the browser history adapter and the global event hooks the
//! router depends on.

use folio_core::{HistoryStack, log};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL hash (without the '#' prefix).
pub fn get_hash() -> String {
    let hash = window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    hash_fragment(&hash).to_string()
}

/// Fragment of a `location.hash` value: only the delimiter is removed.
fn hash_fragment(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

/// `window.history` addressed by fragment.
///
/// Uses `pushState`/`replaceState`, which do not fire `hashchange`, so the
/// router never re-enters itself when it records a route.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHistory;

impl HistoryStack for BrowserHistory {
    fn current_fragment(&self) -> String {
        get_hash()
    }

    fn push_fragment(&self, fragment: &str) {
        if let Some(window) = window()
            && let Ok(history) = window.history()
        {
            let hash = format!("#{}", fragment);
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&hash));
        }
    }

    fn replace_fragment(&self, fragment: &str) {
        if let Some(window) = window()
            && let Ok(history) = window.history()
        {
            let hash = format!("#{}", fragment);
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&hash));
        }
    }
}

/// Call `handler` with the new fragment on every `hashchange`
/// (back/forward, manual edits, plain `#` links).
///
/// The listener lives for the lifetime of the page.
pub fn on_hash_change<F>(handler: F)
where
    F: Fn(String) + 'static,
{
    let closure = Closure::wrap(Box::new(move || handler(get_hash())) as Box<dyn Fn()>);

    if let Some(window) = window() {
        let _ =
            window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

// =============================================================================
// Offline Worker
// =============================================================================

/// Register the offline worker script, if the browser supports workers.
///
/// Registration runs in the background; the outcome is only logged.
pub fn register_service_worker(script: &str) {
    let Some(window) = window() else {
        return;
    };

    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        return;
    }

    let promise = navigator.service_worker().register(script);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(registration) => {
                let scope = registration
                    .dyn_into::<web_sys::ServiceWorkerRegistration>()
                    .map(|r| r.scope())
                    .unwrap_or_default();
                log::info(&format!("Service Worker registered with scope: {}", scope));
            }
            Err(e) => {
                log::warn(&format!("Service Worker registration failed: {:?}", e));
            }
        }
    });
}
