//! Browser fetch implementation of [`ContentSource`].
//!
//! One GET per call, resolved against the page URL. No timeout and no
//! retry: a failed load waits for the next navigation.

use folio_core::{ContentSource, FetchError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Fetches site content through `window.fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSource;

impl ContentSource for BrowserSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let resp = fetch_url(path).await?;
        let body = resp
            .text()
            .map_err(|e| FetchError::Network(js_message(&e)))?;
        let text = JsFuture::from(body)
            .await
            .map_err(|e| FetchError::Network(js_message(&e)))?;

        text.as_string()
            .ok_or_else(|| FetchError::Network("Response body is not text".to_string()))
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let resp = fetch_url(path).await?;
        let body = resp
            .array_buffer()
            .map_err(|e| FetchError::Network(js_message(&e)))?;
        let buffer = JsFuture::from(body)
            .await
            .map_err(|e| FetchError::Network(js_message(&e)))?;

        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

/// GET a URL using the Fetch API. Non-2xx responses are errors.
async fn fetch_url(url: &str) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or(FetchError::Unavailable)?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|_| FetchError::Unavailable)?;

    let result = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Network(js_message(&e)))?;

    let resp: Response = result
        .dyn_into()
        .map_err(|_| FetchError::Network("Invalid response".to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    Ok(resp)
}

/// Best-effort message from a thrown JS value (usually a `TypeError`).
fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}
