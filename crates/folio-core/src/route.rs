//! Hash-based routes.
//!
//! The URL fragment is the only routing channel. Canonical forms:
//! - `#posts` → post list (empty fragment is an alias)
//! - `#post/<filename>` → a single post
//! - `#<page>` → a static page from the configured allow-list

use std::fmt;

/// Fragment prefix for single-post routes.
pub const POST_PREFIX: &str = "post/";

/// Canonical fragment of the post list.
pub const POSTS_FRAGMENT: &str = "posts";

/// Classified target of a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    PostsList,
    /// Post identified by its manifest filename (may be empty)
    Post(String),
    /// Static page by name
    Page(String),
    /// Fragment that matches nothing, kept for diagnostics
    Unknown(String),
}

impl Route {
    /// Classify a fragment, given without its `#` delimiter.
    ///
    /// Every input maps to exactly one variant.
    pub fn from_fragment<S: AsRef<str>>(fragment: &str, static_pages: &[S]) -> Self {
        if let Some(id) = fragment.strip_prefix(POST_PREFIX) {
            return Self::Post(id.to_string());
        }

        if fragment.is_empty() || fragment == POSTS_FRAGMENT {
            return Self::PostsList;
        }

        if static_pages.iter().any(|p| p.as_ref() == fragment) {
            return Self::Page(fragment.to_string());
        }

        Self::Unknown(fragment.to_string())
    }

    /// Canonical fragment (without `#`) to record in history.
    ///
    /// `None` for [`Route::Unknown`]: dead links never enter the back stack.
    pub fn fragment(&self) -> Option<String> {
        match self {
            Self::PostsList => Some(POSTS_FRAGMENT.to_string()),
            Self::Post(id) => Some(format!("{}{}", POST_PREFIX, id)),
            Self::Page(name) => Some(name.clone()),
            Self::Unknown(_) => None,
        }
    }

    /// Canonical `#`-prefixed hash for links.
    pub fn to_hash(&self) -> Option<String> {
        self.fragment().map(|f| format!("#{}", f))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostsList => write!(f, "posts list"),
            Self::Post(id) => write!(f, "post {}", id),
            Self::Page(name) => write!(f, "{} page", name),
            Self::Unknown(fragment) => write!(f, "unknown route '{}'", fragment),
        }
    }
}
