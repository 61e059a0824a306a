//! Driving port for reading the signed-in account.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for account lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Fetch the account behind a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] when the account has since been deleted.
    async fn current_user(&self, user_id: UserId) -> Result<User, Error>;
}
