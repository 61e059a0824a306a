//! PostgreSQL-backed `UserSettingsRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{UserSettingsRepository, UserSettingsRepositoryError};
use crate::domain::{UserId, UserSettings};

use super::diesel_error_mapping::{map_diesel_error as map_basic_diesel_error, map_pool_error};
use super::models::UserSettingsRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_settings;

/// Delete the settings row of `user_id` on `conn`.
pub(super) async fn delete_settings_of(
    conn: &mut AsyncPgConnection,
    user_id: UserId,
) -> QueryResult<usize> {
    diesel::delete(user_settings::table.filter(user_settings::user_id.eq(user_id.as_i64())))
        .execute(conn)
        .await
}

/// Diesel-backed implementation of the [`UserSettingsRepository`] port.
#[derive(Clone)]
pub struct DieselUserSettingsRepository {
    pool: DbPool,
}

impl DieselUserSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserSettingsRepositoryError {
    map_pool_error(error, UserSettingsRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserSettingsRepositoryError {
    map_basic_diesel_error(
        error,
        UserSettingsRepositoryError::query,
        UserSettingsRepositoryError::connection,
    )
}

#[async_trait]
impl UserSettingsRepository for DieselUserSettingsRepository {
    async fn find(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserSettings>, UserSettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<UserSettingsRow> = user_settings::table
            .filter(user_settings::user_id.eq(user_id.as_i64()))
            .select(UserSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_settings().map_err(UserSettingsRepositoryError::query))
            .transpose()
    }

    async fn save(&self, settings: &UserSettings) -> Result<(), UserSettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = UserSettingsRow::from_settings(settings);
        diesel::insert_into(user_settings::table)
            .values(&row)
            .on_conflict(user_settings::user_id)
            .do_update()
            .set(user_settings::language.eq(excluded(user_settings::language)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_for_user(&self, user_id: UserId) -> Result<(), UserSettingsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        delete_settings_of(&mut conn, user_id)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
