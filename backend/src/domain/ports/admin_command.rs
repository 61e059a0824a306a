//! Driving port for back-office mutations.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, SnippetId, User, UserId};

/// Admin edit form for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserUpdate {
    /// Replacement username.
    #[schema(example = "ada_l")]
    pub username: String,
    /// Replacement email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Replacement admin flag.
    pub is_admin: bool,
}

/// Domain use-case port for moderator mutations.
///
/// Every method takes the acting user; see
/// [`AdminQuery`](super::AdminQuery) for the authorisation rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCommand: Send + Sync {
    /// Replace username, email, and admin flag.
    ///
    /// # Errors
    ///
    /// Returns one validation error listing every failing field, including
    /// uniqueness clashes, or [`Error::not_found`] for an unknown user.
    async fn update_user(
        &self,
        actor: UserId,
        id: UserId,
        update: AdminUserUpdate,
    ) -> Result<User, Error>;

    /// Grant or revoke admin rights.
    async fn set_admin(&self, actor: UserId, id: UserId, is_admin: bool) -> Result<User, Error>;

    /// Delete an account with all of its snippets and settings.
    async fn delete_user(&self, actor: UserId, id: UserId) -> Result<(), Error>;

    /// Delete any snippet. Missing ids succeed.
    async fn delete_snippet(&self, actor: UserId, id: SnippetId) -> Result<(), Error>;

    /// Delete a snippet only if `owner` owns it. Missing ids succeed.
    async fn delete_user_snippet(
        &self,
        actor: UserId,
        owner: UserId,
        id: SnippetId,
    ) -> Result<(), Error>;
}
