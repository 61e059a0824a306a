//! Back-office domain services.
//!
//! Moderators list, edit, and delete any account or snippet. Each operation
//! first re-reads the acting user so a revoked admin flag takes effect on the
//! next request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::accounts_service::{check_profile_available, parse_profile_fields};
use crate::domain::port_errors::{map_settings_error, map_snippet_error, map_user_error};
use crate::domain::ports::{
    AdminCommand, AdminQuery, AdminUserUpdate, SnippetRepository, UserRepository,
    UserSettingsRepository,
};
use crate::domain::{
    Email, Error, FieldErrors, Language, Snippet, SnippetId, SnippetWithOwner, User, UserChanges,
    UserId, UserWithSnippets,
};

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

/// Admin service implementing the back-office driving ports.
#[derive(Clone)]
pub struct AdminService<U, S, T> {
    users: Arc<U>,
    snippets: Arc<S>,
    settings: Arc<T>,
}

impl<U, S, T> AdminService<U, S, T> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, snippets: Arc<S>, settings: Arc<T>) -> Self {
        Self {
            users,
            snippets,
            settings,
        }
    }
}

impl<U, S, T> AdminService<U, S, T>
where
    U: UserRepository,
    S: SnippetRepository,
    T: UserSettingsRepository,
{
    async fn authorize(&self, actor: UserId) -> Result<User, Error> {
        let user = self
            .users
            .find_by_id(actor)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if !user.is_admin() {
            return Err(Error::forbidden("admin access required"));
        }
        Ok(user)
    }

    async fn require_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)
    }

    fn attach_snippets(users: Vec<User>, snippets: Vec<Snippet>) -> Vec<UserWithSnippets> {
        let mut by_owner: HashMap<UserId, Vec<Snippet>> = HashMap::new();
        for snippet in snippets {
            by_owner.entry(snippet.owner_id).or_default().push(snippet);
        }
        users
            .into_iter()
            .map(|user| {
                let snippets = by_owner.remove(&user.id()).unwrap_or_default();
                UserWithSnippets { user, snippets }
            })
            .collect()
    }
}

#[async_trait]
impl<U, S, T> AdminQuery for AdminService<U, S, T>
where
    U: UserRepository,
    S: SnippetRepository,
    T: UserSettingsRepository,
{
    async fn find_all_users(
        &self,
        actor: UserId,
        page: PageRequest,
    ) -> Result<Paginated<UserWithSnippets>, Error> {
        self.authorize(actor).await?;

        let rows = self.users.list_page(page).await.map_err(map_user_error)?;
        let users = Paginated::from_lookahead(page, rows);
        let owners: Vec<UserId> = users.items.iter().map(User::id).collect();
        let snippets = self
            .snippets
            .list_by_owners(&owners)
            .await
            .map_err(map_snippet_error)?;

        let Paginated {
            items,
            page,
            take,
            has_more,
        } = users;
        Ok(Paginated {
            items: Self::attach_snippets(items, snippets),
            page,
            take,
            has_more,
        })
    }

    async fn find_one_user(&self, actor: UserId, id: UserId) -> Result<User, Error> {
        self.authorize(actor).await?;
        self.require_user(id).await
    }

    async fn find_user_by_email(&self, actor: UserId, email: &str) -> Result<User, Error> {
        self.authorize(actor).await?;

        let mut errors = FieldErrors::default();
        let email = errors.check("email", Email::new(email));
        errors.into_result()?;
        let Some(email) = email else {
            return Err(Error::internal("email missing after validation"));
        };

        self.users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)
    }

    async fn find_all_snippets_user(
        &self,
        actor: UserId,
        id: UserId,
    ) -> Result<Vec<SnippetWithOwner>, Error> {
        self.authorize(actor).await?;

        let Some(owner) = self.users.find_by_id(id).await.map_err(map_user_error)? else {
            return Ok(Vec::new());
        };
        let snippets = self
            .snippets
            .list_by_owner(id)
            .await
            .map_err(map_snippet_error)?;
        Ok(snippets
            .into_iter()
            .map(|snippet| SnippetWithOwner {
                snippet,
                owner_username: owner.username().clone(),
            })
            .collect())
    }

    async fn find_all_snippets(
        &self,
        actor: UserId,
        page: PageRequest,
    ) -> Result<Paginated<SnippetWithOwner>, Error> {
        self.authorize(actor).await?;
        let rows = self
            .snippets
            .list_page(page)
            .await
            .map_err(map_snippet_error)?;
        Ok(Paginated::from_lookahead(page, rows))
    }

    async fn get_current_lang(&self, actor: UserId, id: UserId) -> Result<Language, Error> {
        self.authorize(actor).await?;
        self.settings
            .find(id)
            .await
            .map_err(map_settings_error)?
            .map(|settings| settings.language)
            .ok_or_else(|| Error::not_found("settings not found"))
    }
}

#[async_trait]
impl<U, S, T> AdminCommand for AdminService<U, S, T>
where
    U: UserRepository,
    S: SnippetRepository,
    T: UserSettingsRepository,
{
    async fn update_user(
        &self,
        actor: UserId,
        id: UserId,
        update: AdminUserUpdate,
    ) -> Result<User, Error> {
        self.authorize(actor).await?;
        self.require_user(id).await?;

        let AdminUserUpdate {
            username,
            email,
            is_admin,
        } = update;
        let mut errors = FieldErrors::default();
        let (username, email) = parse_profile_fields(username, email, &mut errors);
        check_profile_available(
            self.users.as_ref(),
            username.as_ref(),
            email.as_ref(),
            Some(id),
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let (Some(username), Some(email)) = (username, email) else {
            return Err(Error::internal("user fields missing after validation"));
        };
        let changes = UserChanges {
            username,
            email,
            is_admin,
        };
        let user = self
            .users
            .update(id, &changes)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)?;
        info!(%actor, user_id = %id, "admin updated user");
        Ok(user)
    }

    async fn set_admin(&self, actor: UserId, id: UserId, is_admin: bool) -> Result<User, Error> {
        self.authorize(actor).await?;
        let user = self
            .users
            .set_admin(id, is_admin)
            .await
            .map_err(map_user_error)?
            .ok_or_else(user_not_found)?;
        info!(%actor, user_id = %id, is_admin, "admin flag changed");
        Ok(user)
    }

    async fn delete_user(&self, actor: UserId, id: UserId) -> Result<(), Error> {
        self.authorize(actor).await?;
        let deleted = self
            .users
            .delete_account(id)
            .await
            .map_err(map_user_error)?;
        if !deleted {
            return Err(user_not_found());
        }
        info!(%actor, user_id = %id, "admin deleted user");
        Ok(())
    }

    async fn delete_snippet(&self, actor: UserId, id: SnippetId) -> Result<(), Error> {
        self.authorize(actor).await?;
        self.snippets.delete(id).await.map_err(map_snippet_error)
    }

    async fn delete_user_snippet(
        &self,
        actor: UserId,
        owner: UserId,
        id: SnippetId,
    ) -> Result<(), Error> {
        self.authorize(actor).await?;
        self.snippets
            .delete_owned(id, owner)
            .await
            .map_err(map_snippet_error)
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
