//! Backend entry-point: loads settings, prepares persistence, and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use runit::inbound::http::health::HealthState;
use runit::inbound::http::session_config::{BuildMode, session_settings};
use runit::outbound::persistence::{DbPool, run_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )
    .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );

    if let Some(pool_config) = settings.pool_config() {
        let database_url = pool_config.database_url().to_owned();
        tokio::task::spawn_blocking(move || run_migrations(&database_url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to apply migrations")?;
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to create database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await?;
    Ok(())
}
