//! User settings HTTP handlers.
//!
//! ```text
//! GET /api/v1/users/me/settings
//! PUT /api/v1/users/me/settings {"language":"ru"}
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, FieldErrors, Language, UserSettings};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::require_session_user;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for changing the interface language.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    #[schema(example = "ru")]
    pub language: String,
}

fn parse_language(value: &str) -> Result<Language, Error> {
    Language::from_str(value).map_err(|err| {
        let mut errors = FieldErrors::default();
        errors.push("language", err.to_string());
        Error::validation(errors)
    })
}

/// Fetch the signed-in user's settings.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/settings",
    description = "Fetch settings, creating defaults if none exist.",
    responses(
        (
            status = 200,
            description = "User settings",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = UserSettings
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "getSettings"
)]
#[get("/users/me/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = require_session_user(&state, &session).await?.id();
    let settings = state.settings_query.fetch_settings(user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, must-revalidate, no-cache"))
        .json(settings))
}

/// Change the signed-in user's interface language.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/settings",
    request_body = SettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = UserSettings),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateSettings"
)]
#[put("/users/me/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SettingsRequest>,
) -> ApiResult<web::Json<UserSettings>> {
    let user_id = require_session_user(&state, &session).await?.id();
    let language = parse_language(&payload.language)?;
    let settings = state.settings.update_language(user_id, language).await?;
    Ok(web::Json(settings))
}
