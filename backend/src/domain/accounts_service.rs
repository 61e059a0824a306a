//! Account domain services.
//!
//! Implements sign-up, sign-in, profile edits, and account closure on top of
//! the user repository. Form validation reports every failing field at once,
//! including usernames or emails already taken by another account.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::port_errors::map_user_error;
use crate::domain::ports::{
    AccountsCommand, AccountsQuery, NewAccount, SignUpRequest, UpdateAccountRequest,
    UserRepository,
};
use crate::domain::{
    Email, Error, FieldErrors, LoginCredentials, Password, User, UserChanges, UserId, Username,
    hash_password, verify_password,
};

/// Parse username and email, recording failures under their field names.
pub(crate) fn parse_profile_fields(
    username: String,
    email: String,
    errors: &mut FieldErrors,
) -> (Option<Username>, Option<Email>) {
    let username = errors.check("username", Username::new(username));
    let email = errors.check("email", Email::new(email));
    (username, email)
}

/// Record a field error for each value already used by an account other than
/// `owner`.
pub(crate) async fn check_profile_available<U>(
    users: &U,
    username: Option<&Username>,
    email: Option<&Email>,
    owner: Option<UserId>,
    errors: &mut FieldErrors,
) -> Result<(), Error>
where
    U: UserRepository + ?Sized,
{
    let is_other = |user: &User| Some(user.id()) != owner;

    if let Some(username) = username {
        let existing = users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?;
        if existing.as_ref().is_some_and(is_other) {
            errors.push("username", "username is already in use");
        }
    }
    if let Some(email) = email {
        let existing = users.find_by_email(email).await.map_err(map_user_error)?;
        if existing.as_ref().is_some_and(is_other) {
            errors.push("email", "email is already in use");
        }
    }
    Ok(())
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service with the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> AccountsCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error> {
        let SignUpRequest {
            username,
            email,
            password,
        } = request;

        let mut errors = FieldErrors::default();
        let (username, email) = parse_profile_fields(username, email, &mut errors);
        let password = errors.check("password", Password::new(&password));
        check_profile_available(
            self.users.as_ref(),
            username.as_ref(),
            email.as_ref(),
            None,
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(Error::internal("sign-up fields missing after validation"));
        };

        let account = NewAccount {
            username,
            email,
            password_hash: hash_password(&password)?,
        };
        let user = self
            .users
            .create_account(&account)
            .await
            .map_err(map_user_error)?;
        debug!(user_id = %user.id(), "account created");
        Ok(user)
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_credentials(credentials.email())
            .await
            .map_err(map_user_error)?;

        match stored {
            Some(stored) if verify_password(&stored.password_hash, credentials.password()) => {
                Ok(stored.user)
            }
            _ => {
                debug!("sign-in rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }

    async fn update_account(
        &self,
        user_id: UserId,
        request: UpdateAccountRequest,
    ) -> Result<User, Error> {
        let mut errors = FieldErrors::default();
        let (username, email) = parse_profile_fields(request.username, request.email, &mut errors);

        let current = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        check_profile_available(
            self.users.as_ref(),
            username.as_ref(),
            email.as_ref(),
            Some(user_id),
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let (Some(username), Some(email)) = (username, email) else {
            return Err(Error::internal("account fields missing after validation"));
        };
        let changes = UserChanges {
            username,
            email,
            is_admin: current.is_admin(),
        };
        self.users
            .update(user_id, &changes)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn delete_account(&self, user_id: UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete_account(user_id)
            .await
            .map_err(map_user_error)?;
        if !deleted {
            return Err(Error::not_found("user not found"));
        }
        debug!(%user_id, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl<U> AccountsQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
