//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use runit::inbound::http::state::HttpState;
use runit::outbound::memory::InMemoryStore;
use runit::outbound::persistence::{
    DbPool, DieselSnippetRepository, DieselUserRepository, DieselUserSettingsRepository,
};

use super::ServerConfig;

/// PostgreSQL-backed state when a pool is configured, otherwise an empty
/// in-memory store that is lost on restart.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_repositories(store.clone(), store.clone(), store)
        }
    };
    web::Data::new(state)
}

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselSnippetRepository::new(pool.clone())),
        Arc::new(DieselUserSettingsRepository::new(pool.clone())),
    )
}
