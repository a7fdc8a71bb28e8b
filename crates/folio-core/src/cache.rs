//! Session cache of loaded posts.
//!
//! Keyed by manifest filename. Entries are never evicted; the cache lives
//! as long as the router that owns it.
//!
//! The map sits behind a [`RefCell`] so overlapping navigations on the
//! single UI thread can share it. No borrow is held across an `.await`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use crate::preview::extract_preview;

/// Loaded post content with its derived preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedPost {
    /// Markdown source as fetched
    pub content: String,
    /// Plain-text excerpt for the list view
    pub preview: String,
}

impl CachedPost {
    /// Build an entry, deriving the preview from `content`.
    pub fn from_markdown(content: String, preview_length: usize) -> Self {
        let preview = extract_preview(&content, preview_length);
        Self { content, preview }
    }
}

/// Filename → post mapping with at most one entry per filename.
#[derive(Default)]
pub struct PostCache {
    entries: RefCell<HashMap<String, Rc<CachedPost>>>,
}

impl PostCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<Rc<CachedPost>> {
        self.entries.borrow().get(filename).cloned()
    }

    /// Store an entry, replacing any previous one for `filename`.
    pub fn put(&self, filename: &str, post: CachedPost) -> Rc<CachedPost> {
        let post = Rc::new(post);
        self.entries
            .borrow_mut()
            .insert(filename.to_string(), Rc::clone(&post));
        post
    }

    /// Preview text for the list view, if the post is loaded.
    pub fn preview(&self, filename: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(filename)
            .map(|p| p.preview.clone())
    }

    /// Return the cached entry, or run `loader`, store its result and
    /// return it. Loader errors are passed through and nothing is stored.
    ///
    /// Two calls racing on the same missing key both load; the later store
    /// wins, which is harmless since post content is static.
    pub async fn get_or_load<F, Fut, E>(&self, filename: &str, loader: F) -> Result<Rc<CachedPost>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedPost, E>>,
    {
        if let Some(post) = self.get(filename) {
            return Ok(post);
        }

        let post = loader().await?;
        Ok(self.put(filename, post))
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entries.borrow().contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
