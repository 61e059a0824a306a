//! Driving port for snippet mutations made by their owner.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Snippet, SnippetId, UserId};

/// Editor save payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDraft {
    /// Display name.
    #[schema(example = "fizzbuzz")]
    pub name: String,
    /// Source text; may be empty.
    #[serde(default)]
    #[schema(example = "for i in range(1, 101): print(i)")]
    pub code: String,
}

/// Domain use-case port for owner-scoped snippet changes.
///
/// `owner` is always the signed-in user. A snippet owned by anyone else is
/// treated as missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetsCommand: Send + Sync {
    /// Save a new snippet under a freshly generated slug.
    async fn create(&self, owner: UserId, draft: SnippetDraft) -> Result<Snippet, Error>;

    /// Replace name and code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] if `(id, owner)` matches nothing.
    async fn update(
        &self,
        id: SnippetId,
        owner: UserId,
        draft: SnippetDraft,
    ) -> Result<Snippet, Error>;

    /// Change the name only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] if `(id, owner)` matches nothing; the
    /// snippet is left unchanged.
    async fn rename(&self, id: SnippetId, owner: UserId, name: String) -> Result<(), Error>;

    /// Delete `(id, owner)`. Deleting a missing snippet succeeds.
    async fn delete(&self, id: SnippetId, owner: UserId) -> Result<(), Error>;

    /// Delete every snippet of `owner`.
    async fn delete_all_for_user(&self, owner: UserId) -> Result<(), Error>;
}
