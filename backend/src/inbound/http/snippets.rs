//! Snippet HTTP handlers.
//!
//! Owner routes act on the signed-in user's snippets; a snippet owned by
//! anyone else answers as missing.
//!
//! ```text
//! GET /api/v1/snippets
//! POST /api/v1/snippets {"name":"fizzbuzz","code":"..."}
//! GET /api/v1/snippets/{id}
//! PUT /api/v1/snippets/{id}
//! PATCH /api/v1/snippets/{id}/name {"name":"fizzbuzz v2"}
//! DELETE /api/v1/snippets/{id}
//! GET /api/v1/users/{username}/snippets/{slug}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Snippet;
use crate::domain::ports::SnippetDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::require_session_user;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::snippet_id_param;

/// Request payload for `PATCH /api/v1/snippets/{id}/name`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    #[schema(example = "fizzbuzz v2")]
    pub name: String,
}

/// List the signed-in user's snippets.
#[utoipa::path(
    get,
    path = "/api/v1/snippets",
    responses(
        (status = 200, description = "Snippets ordered by id", body = [Snippet]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "listSnippets"
)]
#[get("/snippets")]
pub async fn list_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Snippet>>> {
    let owner = require_session_user(&state, &session).await?.id();
    let snippets = state.snippets_query.list_by_owner(owner).await?;
    Ok(web::Json(snippets))
}

/// Save a new snippet under a generated share slug.
#[utoipa::path(
    post,
    path = "/api/v1/snippets",
    request_body = SnippetDraft,
    responses(
        (status = 201, description = "Snippet created", body = Snippet),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "createSnippet"
)]
#[post("/snippets")]
pub async fn create_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SnippetDraft>,
) -> ApiResult<HttpResponse> {
    let owner = require_session_user(&state, &session).await?.id();
    let snippet = state.snippets.create(owner, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(snippet))
}

/// Fetch one of the signed-in user's snippets.
#[utoipa::path(
    get,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet", body = Snippet),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "getSnippet"
)]
#[get("/snippets/{id}")]
pub async fn get_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Snippet>> {
    let owner = require_session_user(&state, &session).await?.id();
    let id = snippet_id_param(path.into_inner())?;
    let snippet = state.snippets_query.get(id, owner).await?;
    Ok(web::Json(snippet))
}

/// Replace name and code of a snippet.
#[utoipa::path(
    put,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    request_body = SnippetDraft,
    responses(
        (status = 200, description = "Updated snippet", body = Snippet),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "updateSnippet"
)]
#[put("/snippets/{id}")]
pub async fn update_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<SnippetDraft>,
) -> ApiResult<web::Json<Snippet>> {
    let owner = require_session_user(&state, &session).await?.id();
    let id = snippet_id_param(path.into_inner())?;
    let snippet = state
        .snippets
        .update(id, owner, payload.into_inner())
        .await?;
    Ok(web::Json(snippet))
}

/// Rename a snippet.
#[utoipa::path(
    patch,
    path = "/api/v1/snippets/{id}/name",
    params(("id" = i64, Path, description = "Snippet id")),
    request_body = RenameRequest,
    responses(
        (status = 204, description = "Renamed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "renameSnippet"
)]
#[patch("/snippets/{id}/name")]
pub async fn rename_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RenameRequest>,
) -> ApiResult<HttpResponse> {
    let owner = require_session_user(&state, &session).await?.id();
    let id = snippet_id_param(path.into_inner())?;
    state
        .snippets
        .rename(id, owner, payload.into_inner().name)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a snippet. Deleting a missing snippet succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "deleteSnippet"
)]
#[delete("/snippets/{id}")]
pub async fn delete_snippet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = require_session_user(&state, &session).await?.id();
    let id = snippet_id_param(path.into_inner())?;
    state.snippets.delete(id, owner).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Open a shared snippet by its owner's username and slug.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/snippets/{slug}",
    params(
        ("username" = String, Path, description = "Owner's username"),
        ("slug" = String, Path, description = "Share-link slug")
    ),
    responses(
        (status = 200, description = "Shared snippet", body = Snippet),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "viewSharedSnippet",
    security([])
)]
#[get("/users/{username}/snippets/{slug}")]
pub async fn view_shared_snippet(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Snippet>> {
    let (username, slug) = path.into_inner();
    let snippet = state.snippets_query.view_by_slug(&username, &slug).await?;
    Ok(web::Json(snippet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserRepository;
    use crate::inbound::http::test_utils::{api_app, memory_state, session_cookie, sign_up};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn create<S, B>(app: &S, cookie: &Cookie<'static>, name: &str) -> Value
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let req = test::TestRequest::post()
            .uri("/api/v1/snippets")
            .cookie(cookie.clone())
            .set_json(json!({ "name": name, "code": "print('hi')" }))
            .to_request();
        let res = test::call_service(app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn create_then_list_and_fetch() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (owner, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;

        let created = create(&app, &cookie, "fizzbuzz").await;
        assert_eq!(created["ownerId"], json!(owner.as_i64()));
        assert_eq!(created["slug"].as_str().map(str::len), Some(8));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/snippets")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let listed: Value = test::read_body_json(res).await;
        assert_eq!(listed, json!([created.clone()]));

        let uri = format!("/api/v1/snippets/{}", created["id"]);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(&uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn rename_of_foreign_snippet_leaves_it_unchanged() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, ada) = sign_up(&app, "ada_l", "ada@example.com").await;
        let (_, bob) = sign_up(&app, "bob_b", "bob@example.com").await;
        let created = create(&app, &ada, "fizzbuzz").await;
        let id = &created["id"];

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/v1/snippets/{id}/name"))
                .cookie(bob)
                .set_json(json!({ "name": "stolen" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/snippets/{id}"))
                .cookie(ada)
                .to_request(),
        )
        .await;
        let fetched: Value = test::read_body_json(res).await;
        assert_eq!(fetched["name"], "fizzbuzz");
    }

    #[actix_web::test]
    async fn fetching_a_foreign_snippet_is_not_found() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, ada) = sign_up(&app, "ada_l", "ada@example.com").await;
        let (_, bob) = sign_up(&app, "bob_b", "bob@example.com").await;
        let created = create(&app, &ada, "fizzbuzz").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/snippets/{}", created["id"]))
                .cookie(bob)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_is_idempotent() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;
        let created = create(&app, &cookie, "fizzbuzz").await;
        let uri = format!("/api/v1/snippets/{}", created["id"]);

        for _ in 0..2 {
            let res = test::call_service(
                &app,
                test::TestRequest::delete()
                    .uri(&uri)
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NO_CONTENT);
        }

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/snippets/999")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn shared_snippet_is_public() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;
        let created = create(&app, &cookie, "fizzbuzz").await;
        let slug = created["slug"].as_str().expect("slug");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/ada_l/snippets/{slug}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/bob_b/snippets/{slug}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn non_numeric_id_is_invalid_request() {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/snippets/abc")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[case::list(test::TestRequest::get().uri("/api/v1/snippets"))]
    #[case::create(
        test::TestRequest::post()
            .uri("/api/v1/snippets")
            .set_json(json!({ "name": "orphan", "code": "print(1)" }))
    )]
    #[case::fetch(test::TestRequest::get().uri("/api/v1/snippets/1"))]
    #[case::delete(test::TestRequest::delete().uri("/api/v1/snippets/1"))]
    #[actix_web::test]
    async fn session_of_deleted_account_is_signed_out(#[case] request: test::TestRequest) {
        let (store, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (id, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;
        create(&app, &cookie, "fizzbuzz").await;
        assert!(store.delete_account(id).await.expect("delete account"));

        let res = test::call_service(&app, request.cookie(cookie).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(session_cookie(&res).value(), "");
    }
}
