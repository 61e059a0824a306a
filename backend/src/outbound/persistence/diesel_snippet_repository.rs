//! PostgreSQL-backed `SnippetRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{SnippetRepository, SnippetRepositoryError};
use crate::domain::{
    NewSnippet, Slug, Snippet, SnippetCode, SnippetId, SnippetName, SnippetWithOwner, UserId,
    Username,
};

use super::diesel_error_mapping::{
    SLUG_UNIQUE, map_diesel_error as map_basic_diesel_error, map_pool_error, unique_violation,
};
use super::models::{NewSnippetRow, SnippetRow, page_window};
use super::pool::{DbPool, PoolError};
use super::schema::{snippets, users};

/// Delete every snippet of `owner` on `conn`, returning how many went.
///
/// Shared with account deletion, which runs it inside its own transaction.
pub(super) async fn delete_owned_by(
    conn: &mut AsyncPgConnection,
    owner: UserId,
) -> QueryResult<usize> {
    diesel::delete(snippets::table.filter(snippets::owner_id.eq(owner.as_i64())))
        .execute(conn)
        .await
}

/// Diesel-backed implementation of the [`SnippetRepository`] port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
}

impl DieselSnippetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SnippetRepositoryError {
    map_pool_error(error, SnippetRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> SnippetRepositoryError {
    map_basic_diesel_error(
        error,
        SnippetRepositoryError::query,
        SnippetRepositoryError::connection,
    )
}

fn row_to_snippet(row: SnippetRow) -> Result<Snippet, SnippetRepositoryError> {
    row.into_snippet().map_err(SnippetRepositoryError::query)
}

fn row_to_listed(
    (row, owner): (SnippetRow, String),
) -> Result<SnippetWithOwner, SnippetRepositoryError> {
    let owner_username = Username::new(owner).map_err(|err| {
        SnippetRepositoryError::query(format!("stored owner of snippet {} is invalid: {err}", row.id))
    })?;
    Ok(SnippetWithOwner {
        snippet: row_to_snippet(row)?,
        owner_username,
    })
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn create(&self, snippet: &NewSnippet) -> Result<Snippet, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let new_row = NewSnippetRow {
            owner_id: snippet.owner_id.as_i64(),
            name: snippet.name.as_ref(),
            code: snippet.code.as_ref(),
            slug: snippet.slug.as_ref(),
        };

        let row = diesel::insert_into(snippets::table)
            .values(&new_row)
            .returning(SnippetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(SLUG_UNIQUE) => SnippetRepositoryError::slug_conflict(snippet.slug.as_ref()),
                _ => map_diesel_error(err),
            })?;
        row_to_snippet(row)
    }

    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = snippets::table
            .filter(snippets::id.eq(id.as_i64()))
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_snippet).transpose()
    }

    async fn find_by_owner_and_slug(
        &self,
        username: &Username,
        slug: &Slug,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = snippets::table
            .inner_join(users::table)
            .filter(users::username.eq(username.as_ref()))
            .filter(snippets::slug.eq(slug.as_ref()))
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_snippet).transpose()
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        self.list_by_owners(&[owner]).await
    }

    async fn list_by_owners(
        &self,
        owners: &[UserId],
    ) -> Result<Vec<Snippet>, SnippetRepositoryError> {
        if owners.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let ids: Vec<i64> = owners.iter().map(|owner| owner.as_i64()).collect();
        let rows: Vec<SnippetRow> = snippets::table
            .filter(snippets::owner_id.eq_any(ids))
            .order_by(snippets::id)
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_snippet).collect()
    }

    async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<SnippetWithOwner>, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let (offset, limit) = page_window(page);
        let rows: Vec<(SnippetRow, String)> = snippets::table
            .inner_join(users::table)
            .order_by(snippets::id)
            .offset(offset)
            .limit(limit)
            .select((SnippetRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_listed).collect()
    }

    async fn rename(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
    ) -> Result<bool, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let updated = diesel::update(
            snippets::table
                .filter(snippets::id.eq(id.as_i64()))
                .filter(snippets::owner_id.eq(owner.as_i64())),
        )
        .set((
            snippets::name.eq(name.as_ref()),
            snippets::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn update(
        &self,
        id: SnippetId,
        owner: UserId,
        name: &SnippetName,
        code: &SnippetCode,
    ) -> Result<Option<Snippet>, SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = diesel::update(
            snippets::table
                .filter(snippets::id.eq(id.as_i64()))
                .filter(snippets::owner_id.eq(owner.as_i64())),
        )
        .set((
            snippets::name.eq(name.as_ref()),
            snippets::code.eq(code.as_ref()),
            snippets::updated_at.eq(Utc::now()),
        ))
        .returning(SnippetRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_snippet).transpose()
    }

    async fn delete(&self, id: SnippetId) -> Result<(), SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::delete(snippets::table.filter(snippets::id.eq(id.as_i64())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_owned(
        &self,
        id: SnippetId,
        owner: UserId,
    ) -> Result<(), SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::delete(
            snippets::table
                .filter(snippets::id.eq(id.as_i64()))
                .filter(snippets::owner_id.eq(owner.as_i64())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete_all_for_user(&self, owner: UserId) -> Result<(), SnippetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        delete_owned_by(&mut conn, owner)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
