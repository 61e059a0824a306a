//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::UserId;
use crate::domain::ports::UserRepository;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, path_config, query_config};
use crate::outbound::memory::InMemoryStore;

/// Password used by every account created through [`sign_up`].
pub const TEST_PASSWORD: &str = "correct horse";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state wired over a fresh in-memory store.
pub fn memory_state() -> (Arc<InMemoryStore>, web::Data<HttpState>) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_repositories(store.clone(), store.clone(), store.clone());
    (store, web::Data::new(state))
}

/// Application exposing every `/api/v1` route over `state`.
pub fn api_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Extract the `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Register `username` through `POST /api/v1/signup` and return the new id
/// with the signed-in session cookie.
pub async fn sign_up<S, B>(app: &S, username: &str, email: &str) -> (UserId, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/signup")
        .set_json(json!({ "username": username, "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "sign-up failed: {}", res.status());
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    let id = body
        .get("id")
        .and_then(Value::as_i64)
        .and_then(|raw| UserId::new(raw).ok())
        .expect("user id in sign-up response");
    (id, cookie)
}

/// Grant admin rights directly through the store.
pub async fn promote(store: &InMemoryStore, id: UserId) {
    store
        .set_admin(id, true)
        .await
        .expect("set admin")
        .expect("user exists");
}
