//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod accounts;
pub mod admin;
pub mod error;
pub mod health;
pub mod navigation;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod settings;
pub mod snippets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` route. The caller supplies the scope, session
/// middleware, and [`state::HttpState`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use runit::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::sign_up)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::current_user)
        .service(accounts::update_account)
        .service(accounts::delete_account)
        .service(settings::get_settings)
        .service(settings::update_settings)
        .service(navigation::resolve_navigation)
        .service(snippets::list_snippets)
        .service(snippets::create_snippet)
        .service(snippets::get_snippet)
        .service(snippets::update_snippet)
        .service(snippets::rename_snippet)
        .service(snippets::delete_snippet)
        .service(snippets::view_shared_snippet)
        .service(web::scope("/admin").configure(admin::configure));
}
