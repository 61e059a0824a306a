//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/signup {"username":"ada_l","email":"ada@example.com","password":"correct horse"}
//! POST /api/v1/login {"email":"ada@example.com","password":"correct horse"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! PUT /api/v1/users/me
//! DELETE /api/v1/users/me
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{SignUpRequest, UpdateAccountRequest};
use crate::domain::{
    Error, ErrorCode, FieldErrors, LoginCredentials, LoginValidationError, User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword
        | LoginValidationError::PasswordTooShort { .. }
        | LoginValidationError::PasswordTooLong { .. } => "password",
    };
    let mut errors = FieldErrors::default();
    errors.push(field, err.to_string());
    Error::validation(errors)
}

/// Resolve the signed-in account.
///
/// A session that outlived its account is purged and treated as signed out.
pub(crate) async fn session_user(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<User>, Error> {
    let Some(user_id) = session.user_id()? else {
        return Ok(None);
    };
    match state.accounts_query.current_user(user_id).await {
        Ok(user) => Ok(Some(user)),
        Err(err) if err.code() == ErrorCode::NotFound => {
            debug!(%user_id, "session refers to a deleted account");
            session.purge();
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Resolve the signed-in account, answering `401` when there is none.
pub(crate) async fn require_session_user(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<User> {
    session_user(state, session)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))
}

fn signed_in(session: &SessionContext, user_id: UserId) -> ApiResult<()> {
    session.persist_user(user_id)?;
    debug!(%user_id, "session established");
    Ok(())
}

/// Register a new account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignUpRequest,
    responses(
        (
            status = 201,
            description = "Account created",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = User
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signUp",
    security([])
)]
#[post("/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.accounts.sign_up(payload.into_inner()).await?;
    signed_in(&session, user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie")),
            body = User
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.accounts.sign_in(&credentials).await?;
    signed_in(&session, user.id())?;
    Ok(web::Json(user))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Fetch the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user = require_session_user(&state, &session).await?;
    Ok(web::Json(user))
}

/// Change username and email of the signed-in account.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount"
)]
#[put("/users/me")]
pub async fn update_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateAccountRequest>,
) -> ApiResult<web::Json<User>> {
    let user = require_session_user(&state, &session).await?;
    let updated = state
        .accounts
        .update_account(user.id(), payload.into_inner())
        .await?;
    Ok(web::Json(updated))
}

/// Delete the signed-in account with all of its snippets and settings, then
/// sign out.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/users/me")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = require_session_user(&state, &session).await?;
    state.accounts.delete_account(user.id()).await?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}
