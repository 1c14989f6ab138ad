//! Ring navigation over the ordered article list.
//!
//! The list is newest first, so "previous" is the older neighbour at
//! `index + 1` and "next" the newer one at `index - 1`. Both wrap around:
//! the newest article's next is the oldest, and the oldest's previous is
//! the newest.

use serde::Serialize;

use crate::meta::ArticleMeta;

/// Neighbours of an article in the ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Neighbors<'a> {
    /// Older article (`index + 1`, wrapping).
    pub previous: &'a ArticleMeta,
    /// Newer article (`index - 1`, wrapping).
    pub next: &'a ArticleMeta,
}

/// Navigation precondition failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// No articles to navigate.
    #[error("cannot navigate an empty article list")]
    EmptyList,
    /// Index past the end of the list.
    #[error("article index {index} out of range for {len} articles")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// List length.
        len: usize,
    },
}

/// Compute previous/next for the article at `index`.
///
/// # Errors
///
/// Returns [`NavigationError`] if `list` is empty or `index` is out of range.
pub fn resolve(list: &[ArticleMeta], index: usize) -> Result<Neighbors<'_>, NavigationError> {
    let len = list.len();
    if len == 0 {
        return Err(NavigationError::EmptyList);
    }
    if index >= len {
        return Err(NavigationError::IndexOutOfRange { index, len });
    }

    Ok(Neighbors {
        previous: &list[(index + 1) % len],
        next: &list[(index + len - 1) % len],
    })
}
