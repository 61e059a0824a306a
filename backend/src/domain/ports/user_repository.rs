//! Port abstraction for user persistence adapters and their errors.
//!
//! Account creation and deletion touch several tables. Adapters perform each
//! of them as one atomic unit so a failure never leaves a user without
//! settings or settings without a user.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Email, User, UserChanges, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError for "user repository" {
        /// Another account already uses this email (case-insensitive).
        DuplicateEmail => "email is already in use",
        /// Another account already uses this username.
        DuplicateUsername => "username is already in use",
    }
}

/// Values required to create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Requested username.
    pub username: Username,
    /// Requested email.
    pub email: Email,
    /// Argon2 PHC hash of the chosen password.
    pub password_hash: String,
}

/// User record together with its password hash, used only for sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// The account.
    pub user: User,
    /// Argon2 PHC hash.
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and its default settings row in one transaction.
    async fn create_account(&self, account: &NewAccount) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email, ignoring case.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the stored hash for the account registered under `email`.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Users ordered by id, skipping `page.offset()` and returning at most
    /// `page.lookahead_limit()` rows.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the mutable fields. Returns `None` when the user is missing.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Set the admin flag only. Returns `None` when the user is missing.
    async fn set_admin(
        &self,
        id: UserId,
        is_admin: bool,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete the user's snippets, then settings, then the user, atomically.
    ///
    /// Returns `false` when no such user exists; nothing is changed then.
    async fn delete_account(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
