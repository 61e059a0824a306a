//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every endpoint of the inbound HTTP adapter, the error
//! envelope and page schemas from [`crate::inbound::http::schemas`], and the
//! session cookie security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::domain::ports::{AdminUserUpdate, SignUpRequest, SnippetDraft, UpdateAccountRequest};
use crate::domain::{Language, Snippet, SnippetWithOwner, User, UserSettings, UserWithSnippets};
use crate::inbound::http::accounts::LoginRequest;
use crate::inbound::http::admin::{AdminFlagRequest, EmailQuery, LanguageResponse};
use crate::inbound::http::navigation::{NavigationQuery, NavigationResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, SnippetPageSchema, UserPageSchema,
};
use crate::inbound::http::settings::SettingsRequest;
use crate::inbound::http::snippets::RenameRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Run IT backend API",
        description = "Accounts, code snippets, user settings, and the admin back-office."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::sign_up,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::update_account,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::settings::get_settings,
        crate::inbound::http::settings::update_settings,
        crate::inbound::http::navigation::resolve_navigation,
        crate::inbound::http::snippets::list_snippets,
        crate::inbound::http::snippets::create_snippet,
        crate::inbound::http::snippets::get_snippet,
        crate::inbound::http::snippets::update_snippet,
        crate::inbound::http::snippets::rename_snippet,
        crate::inbound::http::snippets::delete_snippet,
        crate::inbound::http::snippets::view_shared_snippet,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::find_user_by_email,
        crate::inbound::http::admin::get_user,
        crate::inbound::http::admin::list_user_snippets,
        crate::inbound::http::admin::update_user,
        crate::inbound::http::admin::set_admin,
        crate::inbound::http::admin::delete_user,
        crate::inbound::http::admin::get_user_language,
        crate::inbound::http::admin::list_snippets,
        crate::inbound::http::admin::delete_snippet,
        crate::inbound::http::admin::delete_user_snippet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserPageSchema,
        SnippetPageSchema,
        User,
        Snippet,
        SnippetWithOwner,
        UserWithSnippets,
        UserSettings,
        Language,
        SignUpRequest,
        LoginRequest,
        UpdateAccountRequest,
        SettingsRequest,
        SnippetDraft,
        RenameRequest,
        AdminUserUpdate,
        AdminFlagRequest,
        EmailQuery,
        LanguageResponse,
        NavigationQuery,
        NavigationResponse,
    )),
    tags(
        (name = "accounts", description = "Sign-up, sign-in, profile, and settings"),
        (name = "snippets", description = "Code snippets of the signed-in user and share links"),
        (name = "admin", description = "Back-office for administrators"),
        (name = "navigation", description = "Client route guard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
