//! In-process store implementing every persistence port.
//!
//! Used when no database is configured and by the HTTP integration tests. All
//! three repositories share one mutex-guarded state, so multi-table operations
//! such as account deletion are atomic with respect to every other call.
//! Uniqueness rules mirror the PostgreSQL schema: usernames are unique,
//! emails are unique ignoring case, and slugs are unique per owner.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{
    NewAccount, SnippetRepository, SnippetRepositoryError, StoredCredentials,
    UserPersistenceError, UserRepository, UserSettingsRepository, UserSettingsRepositoryError,
};
use crate::domain::{
    Email, NewSnippet, Slug, Snippet, SnippetCode, SnippetId, SnippetName, SnippetWithOwner, User,
    UserChanges, UserId, UserSettings, Username,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, StoredUser>,
    snippets: BTreeMap<SnippetId, Snippet>,
    settings: BTreeMap<UserId, UserSettings>,
    last_user_id: i64,
    last_snippet_id: i64,
}

impl StoreState {
    fn email_taken(&self, email: &Email, except: Option<UserId>) -> bool {
        let wanted = email.normalized();
        self.users
            .values()
            .any(|stored| Some(stored.user.id()) != except && stored.user.email().normalized() == wanted)
    }

    fn username_taken(&self, username: &Username, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|stored| Some(stored.user.id()) != except && stored.user.username() == username)
    }

    fn check_unique(
        &self,
        username: &Username,
        email: &Email,
        except: Option<UserId>,
    ) -> Result<(), UserPersistenceError> {
        if self.username_taken(username, except) {
            return Err(UserPersistenceError::duplicate_username());
        }
        if self.email_taken(email, except) {
            return Err(UserPersistenceError::duplicate_email());
        }
        Ok(())
    }

    fn find_user_by_email(&self, email: &str) -> Option<&StoredUser> {
        let wanted = email.trim().to_lowercase();
        self.users
            .values()
            .find(|stored| stored.user.email().normalized() == wanted)
    }

    fn owner_username(&self, owner: UserId) -> Option<&Username> {
        self.users.get(&owner).map(|stored| stored.user.username())
    }

    fn remove_snippets_of(&mut self, owner: UserId) {
        self.snippets.retain(|_, snippet| snippet.owner_id != owner);
    }

    fn remove_settings_of(&mut self, user_id: UserId) {
        self.settings.remove(&user_id);
    }
}

/// Mutex-guarded store shared by every repository handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

fn window(page: PageRequest) -> (usize, usize) {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.lookahead_limit()).unwrap_or(usize::MAX);
    (offset, limit)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_account(&self, account: &NewAccount) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        state.check_unique(&account.username, &account.email, None)?;

        let id = UserId::new(state.last_user_id + 1)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let user = User::new(id, account.username.clone(), account.email.clone(), false);
        state.last_user_id = id.as_i64();
        state.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: account.password_hash.clone(),
            },
        );
        state.settings.insert(id, UserSettings::new_default(id));
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .find_user_by_email(email.as_ref())
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.username() == username)
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .find_user_by_email(email)
            .map(|stored| StoredCredentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        let (offset, limit) = window(page);
        Ok(state
            .users
            .values()
            .skip(offset)
            .take(limit)
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        state.check_unique(&changes.username, &changes.email, Some(id))?;
        let updated = User::new(
            id,
            changes.username.clone(),
            changes.email.clone(),
            changes.is_admin,
        );
        Ok(state.users.get_mut(&id).map(|stored| {
            stored.user = updated.clone();
            updated
        }))
    }

    async fn set_admin(
        &self,
        id: UserId,
        is_admin: bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get_mut(&id).map(|stored| {
            stored.user = User::new(
                id,
                stored.user.username().clone(),
                stored.user.email().clone(),
                is_admin,
            );
            stored.user.clone()
        }))
    }

    async fn delete_account(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if !state.users.contains_key(&id) {
            return Ok(false);
        }
        state.remove_snippets_of(id);
        state.remove_settings_of(id);
        state.users.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl SnippetRepository for InMemoryStore {
    async fn create(&self, snippet: &NewSnippet) -> Result<Snippet, SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        if !state.users.contains_key(&snippet.owner_id) {
            return Err(SnippetRepositoryError::query(format!(
                "owner {} does not exist",
                snippet.owner_id
            )));
        }
        let clash = state
            .snippets
            .values()
            .any(|existing| existing.owner_id == snippet.owner_id && existing.slug == snippet.slug);
        if clash {
            return Err(SnippetRepositoryError::slug_conflict(snippet.slug.as_ref()));
        }

        let id = SnippetId::new(state.last_snippet_id + 1)
            .map_err(|err| SnippetRepositoryError::query(err.to_string()))?;
        let created = Snippet {
            id,
            owner_id: snippet.owner_id,
            name: snippet.name.clone(),
            code: snippet.code.clone(),
            slug: snippet.slug.clone(),
        };
        state.last_snippet_id = id.as_i64();
        state.snippets.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let state = self.lock().map_err(SnippetRepositoryError::query)?;
        Ok(state.snippets.get(&id).cloned())
    }

    async fn find_by_owner_and_slug(
        &self,
        username: &Username,
        slug: &Slug,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let state = self.lock().map_err(SnippetRepositoryError::query)?;
        let Some(owner) = state
            .users
            .values()
            .find(|stored| stored.user.username() == username)
            .map(|stored| stored.user.id())
        else {
            return Ok(None);
        };
        Ok(state
            .snippets
            .values()
            .find(|snippet| snippet.owner_id == owner && &snippet.slug == slug)
            .cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        self.list_by_owners(&[owner]).await
    }

    async fn list_by_owners(
        &self,
        owners: &[UserId],
    ) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        let state = self.lock().map_err(SnippetRepositoryError::query)?;
        Ok(state
            .snippets
            .values()
            .filter(|snippet| owners.contains(&snippet.owner_id))
            .cloned()
            .collect())
    }

    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<SnippetWithOwner>, SnippetRepositoryError> {
        let state = self.lock().map_err(SnippetRepositoryError::query)?;
        let (offset, limit) = window(page);
        state
            .snippets
            .values()
            .skip(offset)
            .take(limit)
            .map(|snippet| {
                let owner_username = state.owner_username(snippet.owner_id).cloned().ok_or_else(
                    || SnippetRepositoryError::query(format!("snippet {} has no owner", snippet.id)),
                )?;
                Ok(SnippetWithOwner {
                    snippet: snippet.clone(),
                    owner_username,
                })
            })
            .collect()
    }

    async fn rename(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
    ) -> Result<bool, SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        match state.snippets.get_mut(&id) {
            Some(snippet) if snippet.owner_id == owner => {
                snippet.name = name.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
        code: &SnippetCode,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        match state.snippets.get_mut(&id) {
            Some(snippet) if snippet.owner_id == owner => {
                snippet.name = name.clone();
                snippet.code = code.clone();
                Ok(Some(snippet.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, id: SnippetId) -> Result<(), SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        state.snippets.remove(&id);
        Ok(())
    }

    async fn delete_owned(
        &self,
        id: SnippetId,
        owner: UserId,
    ) -> Result<(), SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        if state
            .snippets
            .get(&id)
            .is_some_and(|snippet| snippet.owner_id == owner)
        {
            state.snippets.remove(&id);
        }
        Ok(())
    }

    async fn delete_all_for_user(&self, owner: UserId) -> Result<(), SnippetRepositoryError> {
        let mut state = self.lock().map_err(SnippetRepositoryError::query)?;
        state.remove_snippets_of(owner);
        Ok(())
    }
}

#[async_trait]
impl UserSettingsRepository for InMemoryStore {
    async fn find(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserSettings>, UserSettingsRepositoryError> {
        let state = self.lock().map_err(UserSettingsRepositoryError::query)?;
        Ok(state.settings.get(&user_id).copied())
    }

    async fn save(&self, settings: &UserSettings) -> Result<(), UserSettingsRepositoryError> {
        let mut state = self.lock().map_err(UserSettingsRepositoryError::query)?;
        if !state.users.contains_key(&settings.user_id) {
            return Err(UserSettingsRepositoryError::query(format!(
                "user {} does not exist",
                settings.user_id
            )));
        }
        state.settings.insert(settings.user_id, *settings);
        Ok(())
    }

    async fn delete_for_user(&self, user_id: UserId) -> Result<(), UserSettingsRepositoryError> {
        let mut state = self.lock().map_err(UserSettingsRepositoryError::query)?;
        state.remove_settings_of(user_id);
        Ok(())
    }
}
