//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-run the
//! domain constructors, so a corrupt row surfaces as a query error instead of
//! an invalid entity.

use diesel::prelude::*;
use pagination::PageRequest;

use crate::domain::{
    Language, Slug, Snippet, SnippetCode, SnippetId, SnippetName, User, UserId, UserSettings,
};

use super::schema::{snippets, user_settings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        let id = self.id;
        User::try_from_parts(id, self.username, self.email, self.is_admin)
            .map_err(|err| format!("stored user {id} is invalid: {err}"))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset struct for updating account fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub is_admin: bool,
}

/// Row struct for reading from the snippets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = snippets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SnippetRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub code: String,
    pub slug: String,
}

impl SnippetRow {
    pub(crate) fn into_snippet(self) -> Result<Snippet, String> {
        let id = self.id;
        let invalid = |err: String| format!("stored snippet {id} is invalid: {err}");
        Ok(Snippet {
            id: SnippetId::new(id).map_err(|err| invalid(err.to_string()))?,
            owner_id: UserId::new(self.owner_id).map_err(|err| invalid(err.to_string()))?,
            name: SnippetName::new(&self.name).map_err(|err| invalid(err.to_string()))?,
            code: SnippetCode::new(self.code).map_err(|err| invalid(err.to_string()))?,
            slug: Slug::new(self.slug).map_err(|err| invalid(err.to_string()))?,
        })
    }
}

/// Insertable struct for creating new snippet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = snippets)]
pub(crate) struct NewSnippetRow<'a> {
    pub owner_id: i64,
    pub name: &'a str,
    pub code: &'a str,
    pub slug: &'a str,
}

/// Row struct for reading and writing the user_settings table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserSettingsRow {
    pub user_id: i64,
    pub language: String,
}

impl UserSettingsRow {
    pub(crate) fn from_settings(settings: &UserSettings) -> Self {
        Self {
            user_id: settings.user_id.as_i64(),
            language: settings.language.as_str().to_owned(),
        }
    }

    pub(crate) fn into_settings(self) -> Result<UserSettings, String> {
        let user_id = UserId::new(self.user_id)
            .map_err(|err| format!("stored settings row is invalid: {err}"))?;
        let language = self.language.parse::<Language>().unwrap_or_else(|err| {
            tracing::warn!(
                user_id = self.user_id,
                error = %err,
                "unrecognised language value, defaulting to en"
            );
            Language::default()
        });
        Ok(UserSettings { user_id, language })
    }
}

/// `(offset, limit)` for a lookahead page query.
pub(crate) fn page_window(page: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(page.lookahead_limit()).unwrap_or(i64::MAX);
    (offset, limit)
}
