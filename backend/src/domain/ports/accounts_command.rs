//! Driving port for account lifecycle operations.
//!
//! Inbound adapters call this port to register, authenticate, edit, and close
//! accounts. Requests carry raw strings; implementations validate every field
//! and report all failures together.

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Requested username.
    #[schema(example = "ada_l")]
    pub username: String,
    /// Requested email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Chosen password.
    #[schema(example = "correct horse")]
    pub password: String,
}

/// Profile settings form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    /// Replacement username.
    #[schema(example = "ada_l")]
    pub username: String,
    /// Replacement email.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Domain use-case port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Register a new account with default settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every invalid or already used field.
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error>;

    /// Check credentials and return the matching account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::unauthorized`] with `invalid credentials` for any
    /// unknown email or wrong password.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Change username and email of the account.
    async fn update_account(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> Result<User, Error>;

    /// Delete the account with all of its snippets and settings.
    async fn delete_account(&self, user_id: UserId) -> Result<(), Error>;
}
