//! In-memory collaborators for tests.
//!
//! Enabled by the `mock` feature (always on for unit tests).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::FetchError;
use crate::fetch::ContentSource;
use crate::router::{HistoryStack, Viewport};

// ============================================================================
// MockSource
// ============================================================================

#[derive(Clone, Debug)]
enum Reply {
    Text(String),
    Bytes(Vec<u8>),
    Status(u16),
    Network(String),
}

/// Path → canned reply, with optional per-path latency.
///
/// Latency is counted in scheduler turns: a path with delay `n` yields `n`
/// times before replying, so concurrent requests complete in a controlled
/// order. Unknown paths reply 404.
#[derive(Default)]
pub struct MockSource {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, usize>,
    requests: RefCell<Vec<String>>,
    in_flight: Cell<usize>,
    peak_in_flight: Cell<usize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, body: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Text(body.to_string()));
        self
    }

    pub fn with_bytes(mut self, path: &str, body: &[u8]) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Bytes(body.to_vec()));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.replies.insert(path.to_string(), Reply::Status(status));
        self
    }

    pub fn with_network_error(mut self, path: &str, message: &str) -> Self {
        self.replies
            .insert(path.to_string(), Reply::Network(message.to_string()));
        self
    }

    pub fn with_delay(mut self, path: &str, turns: usize) -> Self {
        self.delays.insert(path.to_string(), turns);
        self
    }

    /// Every requested path, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }

    /// Most requests ever outstanding at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.get()
    }
}

impl MockSource {
    async fn reply(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(path.to_string());
        self.in_flight.set(self.in_flight.get() + 1);
        self.peak_in_flight
            .set(self.peak_in_flight.get().max(self.in_flight.get()));

        for _ in 0..self.delays.get(path).copied().unwrap_or(0) {
            YieldNow::default().await;
        }

        self.in_flight.set(self.in_flight.get() - 1);
        match self.replies.get(path) {
            Some(Reply::Text(body)) => Ok(body.clone().into_bytes()),
            Some(Reply::Bytes(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(FetchError::Status(*status)),
            Some(Reply::Network(message)) => Err(FetchError::Network(message.clone())),
            None => Err(FetchError::Status(404)),
        }
    }
}

impl ContentSource for MockSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let body = self.reply(path).await?;
        String::from_utf8(body)
            .map_err(|_| FetchError::Network("Response body is not text".to_string()))
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.reply(path).await
    }
}

/// Returns `Pending` once, waking itself immediately.
#[derive(Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

// ============================================================================
// MockViewport
// ============================================================================

/// Records every markup string shown and counts transitions.
#[derive(Default)]
pub struct MockViewport {
    shown: RefCell<Vec<String>>,
    begun: Cell<usize>,
    ended: Cell<usize>,
}

impl MockViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    /// Markup currently displayed.
    pub fn last(&self) -> Option<String> {
        self.shown.borrow().last().cloned()
    }

    /// `(begun, ended)` transition counts.
    pub fn transitions(&self) -> (usize, usize) {
        (self.begun.get(), self.ended.get())
    }
}

impl Viewport for MockViewport {
    fn show(&self, markup: String) {
        self.shown.borrow_mut().push(markup);
    }

    fn begin_transition(&self) {
        self.begun.set(self.begun.get() + 1);
    }

    fn end_transition(&self) {
        self.ended.set(self.ended.get() + 1);
    }
}

// ============================================================================
// MockHistory
// ============================================================================

/// History stack whose last entry is the address bar.
pub struct MockHistory {
    entries: RefCell<Vec<String>>,
}

impl MockHistory {
    /// Start with a single entry, as after loading the page at `fragment`.
    pub fn new(fragment: &str) -> Self {
        Self {
            entries: RefCell::new(vec![fragment.to_string()]),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Simulate the user editing the address bar.
    pub fn set_address(&self, fragment: &str) {
        self.push_fragment(fragment);
    }
}

impl HistoryStack for MockHistory {
    fn current_fragment(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }

    fn push_fragment(&self, fragment: &str) {
        self.entries.borrow_mut().push(fragment.to_string());
    }

    fn replace_fragment(&self, fragment: &str) {
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(last) => *last = fragment.to_string(),
            None => entries.push(fragment.to_string()),
        }
    }
}
