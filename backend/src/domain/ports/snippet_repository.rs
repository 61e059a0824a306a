//! Port for snippet persistence.
//!
//! Owner-scoped mutations match on `(id, owner)` so a snippet owned by someone
//! else behaves exactly like a missing one.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    NewSnippet, Slug, Snippet, SnippetCode, SnippetId, SnippetName, SnippetWithOwner, UserId,
    Username,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by snippet repository adapters.
    pub enum SnippetRepositoryError for "snippet repository" {
        /// The owner already has a snippet with this slug.
        SlugConflict { slug: String } => "slug {slug} is already used by this owner",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a snippet.
    ///
    /// Fails with [`SnippetRepositoryError::SlugConflict`] when the owner
    /// already has a snippet with the same slug.
    async fn create(&self, snippet: &NewSnippet) -> Result<Snippet, SnippetRepositoryError>;

    /// Fetch a snippet by identifier regardless of owner.
    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, SnippetRepositoryError>;

    /// Resolve a share link: the owner's username plus the snippet slug.
    async fn find_by_owner_and_slug(
        &self,
        username: &Username,
        slug: &Slug,
    ) -> Result<Option<Snippet>, SnippetRepositoryError>;

    /// All snippets of one owner, ordered by id.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Snippet>, SnippetRepositoryError>;

    /// All snippets of the given owners, ordered by id.
    async fn list_by_owners(
        &self,
        owners: &[UserId],
    ) -> Result<Vec<Snippet>, SnippetRepositoryError>;

    /// Snippets of every owner ordered by id, skipping `page.offset()` and
    /// returning at most `page.lookahead_limit()` rows.
    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<SnippetWithOwner>, SnippetRepositoryError>;

    /// Change the name of `(id, owner)`. Returns whether a row matched.
    async fn rename(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
    ) -> Result<bool, SnippetRepositoryError>;

    /// Replace name and code of `(id, owner)`. Returns `None` when nothing matched.
    async fn update(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
        code: &SnippetCode,
    ) -> Result<Option<Snippet>, SnippetRepositoryError>;

    /// Delete a snippet whatever its owner. Missing ids are ignored.
    async fn delete(&self, id: SnippetId) -> Result<(), SnippetRepositoryError>;

    /// Delete `(id, owner)`. Missing or foreign snippets are ignored.
    async fn delete_owned(&self, id: SnippetId, owner: UserId)
    -> Result<(), SnippetRepositoryError>;

    /// Delete every snippet of `owner`.
    async fn delete_all_for_user(&self, owner: UserId) -> Result<(), SnippetRepositoryError>;
}
