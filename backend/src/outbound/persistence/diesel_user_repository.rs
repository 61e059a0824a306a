//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Account creation inserts the user and its default settings row inside one
//! transaction. Account deletion removes snippets, settings, and the user in
//! that order inside one transaction, so a failure at any step leaves every
//! table untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::PageRequest;

use crate::domain::ports::{NewAccount, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{Email, Language, User, UserChanges, UserId, Username};

use super::diesel_error_mapping::{
    EMAIL_UNIQUE, USERNAME_UNIQUE, map_diesel_error as map_basic_diesel_error, map_pool_error,
    unique_violation,
};
use super::diesel_snippet_repository::delete_owned_by;
use super::diesel_user_settings_repository::delete_settings_of;
use super::models::{NewUserRow, UserChangeset, UserRow, UserSettingsRow, page_window};
use super::pool::{DbPool, PoolError};
use super::schema::{lower, user_settings, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match unique_violation(&error) {
        Some(EMAIL_UNIQUE) => return UserPersistenceError::duplicate_email(),
        Some(USERNAME_UNIQUE) => return UserPersistenceError::duplicate_username(),
        _ => {}
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_user().map_err(UserPersistenceError::query)
}

fn optional_user(row: Option<UserRow>) -> Result<Option<User>, UserPersistenceError> {
    row.map(row_to_user).transpose()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_account(&self, account: &NewAccount) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let new_row = NewUserRow {
            username: account.username.as_ref(),
            email: account.email.as_ref(),
            password_hash: &account.password_hash,
        };

        let row = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let row: UserRow = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let settings = UserSettingsRow {
                        user_id: row.id,
                        language: Language::default().as_str().to_owned(),
                    };
                    diesel::insert_into(user_settings::table)
                        .values(&settings)
                        .execute(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = users::table
            .filter(users::id.eq(id.as_i64()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_user(row)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = users::table
            .filter(lower(users::email).eq(email.normalized()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_user(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_user(row)
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = users::table
            .filter(lower(users::email).eq(email.trim().to_lowercase()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            let password_hash = row.password_hash.clone();
            row_to_user(row).map(|user| StoredCredentials {
                user,
                password_hash,
            })
        })
        .transpose()
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let (offset, limit) = page_window(page);
        let rows: Vec<UserRow> = users::table
            .order_by(users::id)
            .offset(offset)
            .limit(limit)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let changeset = UserChangeset {
            username: changes.username.as_ref(),
            email: changes.email.as_ref(),
            is_admin: changes.is_admin,
        };
        let row = diesel::update(users::table.filter(users::id.eq(id.as_i64())))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_user(row)
    }

    async fn set_admin(
        &self,
        id: UserId,
        is_admin: bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = diesel::update(users::table.filter(users::id.eq(id.as_i64())))
            .set(users::is_admin.eq(is_admin))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_user(row)
    }

    async fn delete_account(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let user_id = id.as_i64();

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let exists: Option<i64> = users::table
                    .filter(users::id.eq(user_id))
                    .select(users::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if exists.is_none() {
                    return Ok(false);
                }
                delete_owned_by(conn, id).await?;
                delete_settings_of(conn, id).await?;
                let removed = diesel::delete(users::table.filter(users::id.eq(user_id)))
                    .execute(conn)
                    .await?;
                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
