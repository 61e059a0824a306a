//! Translation of driven-port failures into domain errors.
//!
//! Connection problems become `service_unavailable` so clients can retry;
//! everything else unexpected becomes `internal_error`. Uniqueness clashes on
//! user fields are validation failures on the clashing field.

use crate::domain::ports::{
    SnippetRepositoryError, UserPersistenceError, UserSettingsRepositoryError,
};
use crate::domain::{Error, FieldErrors};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => field_clash("email"),
        UserPersistenceError::DuplicateUsername => field_clash("username"),
    }
}

pub(crate) fn map_snippet_error(error: SnippetRepositoryError) -> Error {
    match error {
        SnippetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("snippet repository unavailable: {message}"))
        }
        SnippetRepositoryError::Query { message } => {
            Error::internal(format!("snippet repository error: {message}"))
        }
        SnippetRepositoryError::SlugConflict { slug } => {
            Error::internal(format!("unexpected slug conflict: {slug}"))
        }
    }
}

pub(crate) fn map_settings_error(error: UserSettingsRepositoryError) -> Error {
    match error {
        UserSettingsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("settings repository unavailable: {message}"))
        }
        UserSettingsRepositoryError::Query { message } => {
            Error::internal(format!("settings repository error: {message}"))
        }
    }
}

/// Validation error naming `field` as already taken.
pub(crate) fn field_clash(field: &str) -> Error {
    let mut errors = FieldErrors::default();
    errors.push(field, format!("{field} is already in use"));
    Error::validation(errors)
}
