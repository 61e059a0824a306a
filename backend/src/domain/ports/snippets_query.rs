//! Driving port for snippet reads.

use async_trait::async_trait;

use crate::domain::{Error, Snippet, SnippetId, UserId};

/// Domain use-case port for reading snippets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetsQuery: Send + Sync {
    /// All snippets of `owner`. Callers must not rely on the order.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Snippet>, Error>;

    /// One snippet of `owner`, for reopening it in the editor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] if `(id, owner)` matches nothing.
    async fn get(&self, id: SnippetId, owner: UserId) -> Result<Snippet, Error>;

    /// Resolve a public share link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] when the user or the slug is unknown,
    /// including malformed values.
    async fn view_by_slug(&self, username: &str, slug: &str) -> Result<Snippet, Error>;
}
