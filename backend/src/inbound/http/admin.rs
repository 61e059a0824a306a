//! Admin back-office HTTP handlers, mounted under `/api/v1/admin`.
//!
//! Every route needs a session; the domain service answers non-admins with
//! `403 Forbidden`.
//!
//! ```text
//! GET /api/v1/admin/users?page=1&take=10
//! GET /api/v1/admin/users/by-email?email=ada@example.com
//! GET /api/v1/admin/users/{id}
//! GET /api/v1/admin/users/{id}/snippets
//! PUT /api/v1/admin/users/{id}
//! PATCH /api/v1/admin/users/{id}/admin {"isAdmin":true}
//! DELETE /api/v1/admin/users/{id}
//! GET /api/v1/admin/users/{id}/language
//! GET /api/v1/admin/snippets?page=1&take=10
//! DELETE /api/v1/admin/snippets/{id}
//! DELETE /api/v1/admin/users/{uid}/snippets/{sid}
//! ```

use actix_web::{HttpResponse, delete, get, patch, put, web};
use pagination::{PageQuery, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AdminUserUpdate;
use crate::domain::{Language, SnippetWithOwner, User, UserWithSnippets};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SnippetPageSchema, UserPageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, snippet_id_param, user_id_param};

/// Query string for `GET /api/v1/admin/users/by-email`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmailQuery {
    pub email: String,
}

/// Request payload for `PATCH /api/v1/admin/users/{id}/admin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminFlagRequest {
    pub is_admin: bool,
}

/// Response payload for `GET /api/v1/admin/users/{id}/language`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub language: Language,
}

/// List users with their snippets, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number"),
        ("take" = Option<u32>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Users page", body = UserPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<UserWithSnippets>>> {
    let actor = session.require_user_id()?;
    let page = page_request(query.into_inner())?;
    let users = state.admin_query.find_all_users(actor, page).await?;
    Ok(web::Json(users))
}

/// Find a user by email, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/by-email",
    params(("email" = String, Query, description = "Email address")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminFindUserByEmail"
)]
#[get("/users/by-email")]
pub async fn find_user_by_email(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let actor = session.require_user_id()?;
    let user = state
        .admin_query
        .find_user_by_email(actor, &query.email)
        .await?;
    Ok(web::Json(user))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminGetUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let actor = session.require_user_id()?;
    let id = user_id_param(path.into_inner())?;
    let user = state.admin_query.find_one_user(actor, id).await?;
    Ok(web::Json(user))
}

/// List every snippet of one user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}/snippets",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Snippets, empty for unknown users", body = [SnippetWithOwner]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUserSnippets"
)]
#[get("/users/{id}/snippets")]
pub async fn list_user_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<SnippetWithOwner>>> {
    let actor = session.require_user_id()?;
    let Ok(id) = user_id_param(path.into_inner()) else {
        return Ok(web::Json(Vec::new()));
    };
    let snippets = state.admin_query.find_all_snippets_user(actor, id).await?;
    Ok(web::Json(snippets))
}

/// Replace username, email, and admin flag of a user.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = AdminUserUpdate,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<AdminUserUpdate>,
) -> ApiResult<web::Json<User>> {
    let actor = session.require_user_id()?;
    let id = user_id_param(path.into_inner())?;
    let user = state
        .admin
        .update_user(actor, id, payload.into_inner())
        .await?;
    Ok(web::Json(user))
}

/// Grant or revoke admin rights.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}/admin",
    params(("id" = i64, Path, description = "User id")),
    request_body = AdminFlagRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminSetAdmin"
)]
#[patch("/users/{id}/admin")]
pub async fn set_admin(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<AdminFlagRequest>,
) -> ApiResult<web::Json<User>> {
    let actor = session.require_user_id()?;
    let id = user_id_param(path.into_inner())?;
    let user = state
        .admin
        .set_admin(actor, id, payload.is_admin)
        .await?;
    Ok(web::Json(user))
}

/// Delete a user with all of their snippets and settings.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = user_id_param(path.into_inner())?;
    state.admin.delete_user(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Interface language of one user.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}/language",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Language", body = LanguageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminGetUserLanguage"
)]
#[get("/users/{id}/language")]
pub async fn get_user_language(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LanguageResponse>> {
    let actor = session.require_user_id()?;
    let id = user_id_param(path.into_inner())?;
    let language = state.admin_query.get_current_lang(actor, id).await?;
    Ok(web::Json(LanguageResponse { language }))
}

/// List snippets of all users, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/admin/snippets",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number"),
        ("take" = Option<u32>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Snippets page", body = SnippetPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListSnippets"
)]
#[get("/snippets")]
pub async fn list_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<SnippetWithOwner>>> {
    let actor = session.require_user_id()?;
    let page = page_request(query.into_inner())?;
    let snippets = state.admin_query.find_all_snippets(actor, page).await?;
    Ok(web::Json(snippets))
}

/// Delete any snippet. Missing ids succeed.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteSnippet"
)]
#[delete("/snippets/{id}")]
pub async fn delete_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = snippet_id_param(path.into_inner())?;
    state.admin.delete_snippet(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a snippet only when it belongs to the given user.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{uid}/snippets/{sid}",
    params(
        ("uid" = i64, Path, description = "Owner's user id"),
        ("sid" = i64, Path, description = "Snippet id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteUserSnippet"
)]
#[delete("/users/{uid}/snippets/{sid}")]
pub async fn delete_user_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (uid, sid) = path.into_inner();
    let owner = user_id_param(uid)?;
    let id = snippet_id_param(sid)?;
    state.admin.delete_user_snippet(actor, owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the back-office routes. `by-email` precedes `{id}` so it is not
/// parsed as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(find_user_by_email)
        .service(get_user)
        .service(list_user_snippets)
        .service(update_user)
        .service(set_admin)
        .service(delete_user)
        .service(get_user_language)
        .service(list_snippets)
        .service(delete_snippet)
        .service(delete_user_snippet);
}
