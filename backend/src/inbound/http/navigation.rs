//! Route guard endpoint for the web client.
//!
//! ```text
//! GET /api/v1/navigation?path=/settings
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RouteTable;
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::session_user;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/navigation`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NavigationQuery {
    #[schema(example = "/settings")]
    pub path: String,
}

/// Where the client should land.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NavigationResponse {
    #[schema(example = "/signin")]
    pub path: String,
}

/// Resolve a client navigation against the current session.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(("path" = String, Query, description = "Requested client path")),
    responses(
        (status = 200, description = "Landing path", body = NavigationResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["navigation"],
    operation_id = "resolveNavigation",
    security([])
)]
#[get("/navigation")]
pub async fn resolve_navigation(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NavigationQuery>,
) -> ApiResult<web::Json<NavigationResponse>> {
    let viewer = session_user(&state, &session).await?;
    let path = RouteTable.resolve(&query.path, viewer.as_ref().map(|user| user.username()));
    Ok(web::Json(NavigationResponse { path }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{api_app, memory_state, sign_up};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    #[rstest]
    #[case("/settings", "/signin")]
    #[case("/signup", "/signup")]
    #[case("/", "/")]
    #[actix_web::test]
    async fn guests_are_guarded(#[case] requested: &str, #[case] expected: &str) {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/navigation?path={requested}"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: NavigationResponse = test::read_body_json(res).await;
        assert_eq!(body.path, expected);
    }

    #[rstest]
    #[case("/settings", "/settings")]
    #[case("/signin", "/u/ada_l")]
    #[case("/profile", "/u/ada_l")]
    #[actix_web::test]
    async fn members_are_guarded(#[case] requested: &str, #[case] expected: &str) {
        let (_, state) = memory_state();
        let app = test::init_service(api_app(state)).await;
        let (_, cookie) = sign_up(&app, "ada_l", "ada@example.com").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/navigation?path={requested}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: NavigationResponse = test::read_body_json(res).await;
        assert_eq!(body.path, expected);
    }
}
