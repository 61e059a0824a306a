//! Driving port for back-office reads.
//!
//! Every method takes the acting user. Implementations refuse non-admins with
//! [`Error::forbidden`] and vanished actors with [`Error::unauthorized`].

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{Error, Language, SnippetWithOwner, User, UserId, UserWithSnippets};

/// Domain use-case port for moderator lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// Users ordered by id, each with their snippets.
    async fn find_all_users(
        &self,
        actor: UserId,
        page: PageRequest,
    ) -> Result<Paginated<UserWithSnippets>, Error>;

    /// One user by id.
    async fn find_one_user(&self, actor: UserId, id: UserId) -> Result<User, Error>;

    /// One user by email, ignoring case.
    async fn find_user_by_email(&self, actor: UserId, email: &str) -> Result<User, Error>;

    /// Every snippet of one user. Empty when the user does not exist.
    async fn find_all_snippets_user(
        &self,
        actor: UserId,
        id: UserId,
    ) -> Result<Vec<SnippetWithOwner>, Error>;

    /// Snippets of all users ordered by id.
    async fn find_all_snippets(
        &self,
        actor: UserId,
        page: PageRequest,
    ) -> Result<Paginated<SnippetWithOwner>, Error>;

    /// Interface language of one user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] when the user has no settings row.
    async fn get_current_lang(&self, actor: UserId, id: UserId) -> Result<Language, Error>;
}
