//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Snippet, UserSettings: the persisted entities.
//! - guard / RouteTable: session route guard for client navigation.
//! - AccountService, SnippetService, SettingsService, AdminService: the
//!   driving-port implementations.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

mod accounts_service;
mod admin_service;
mod auth;
mod navigation;
mod port_errors;
mod settings;
mod settings_service;
mod slug;
mod snippet;
mod snippet_service;
mod validation;

pub use self::accounts_service::AccountService;
pub use self::admin_service::AdminService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN, Password, hash_password,
    verify_password,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, REDACTED_MESSAGE};
pub use self::navigation::{PROFILE_PATH, RouteAccess, RouteTable, SIGN_IN_PATH, guard};
pub use self::settings::{Language, UnsupportedLanguage, UserSettings};
pub use self::settings_service::SettingsService;
pub use self::slug::{GENERATED_SLUG_LEN, InvalidSlug, Slug};
pub use self::snippet::{
    NewSnippet, SNIPPET_CODE_MAX_BYTES, SNIPPET_NAME_MAX, Snippet, SnippetCode, SnippetId,
    SnippetName, SnippetValidationError, SnippetWithOwner, UserWithSnippets,
};
pub use self::snippet_service::{MAX_SLUG_ATTEMPTS, SnippetService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, User, UserChanges, UserId, UserValidationError, Username};
pub use self::validation::FieldErrors;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use runit::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("admin access required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
