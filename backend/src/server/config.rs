//! Application settings and the HTTP server configuration built from them.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use runit::inbound::http::session_config::SessionToggles;
use runit::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings layered from CLI flags, `RUNIT_*` environment variables, and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RUNIT")]
pub struct AppSettings {
    /// Bind address; defaults to all interfaces.
    pub host: Option<String>,
    /// Bind port; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    ///
    /// Files and environment only; a clap switch reads as `false` when absent.
    #[ortho_config(skip_cli)]
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy: `Strict`, `Lax`, or `None`.
    pub same_site: Option<String>,
    /// Permit a throwaway session key when the key file is unreadable.
    #[ortho_config(skip_cli)]
    pub allow_ephemeral: Option<bool>,
}

impl AppSettings {
    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.as_deref().unwrap_or(DEFAULT_HOST).parse()?;
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Session cookie toggles for [`runit::inbound::http::session_config`].
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.cookie_secure,
            same_site: self.same_site.clone(),
            allow_ephemeral: self.allow_ephemeral,
        }
    }

    /// Pool configuration when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for application settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "RUNIT_HOST",
        "RUNIT_PORT",
        "RUNIT_DATABASE_URL",
        "RUNIT_POOL_MAX_SIZE",
        "RUNIT_SESSION_KEY_FILE",
        "RUNIT_COOKIE_SECURE",
        "RUNIT_SAME_SITE",
        "RUNIT_ALLOW_EPHEMERAL",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("runit")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.session_toggles(), SessionToggles::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RUNIT_HOST", Some("127.0.0.1".to_owned())),
            ("RUNIT_PORT", Some("9090".to_owned())),
            (
                "RUNIT_DATABASE_URL",
                Some("postgres://runit@localhost/runit".to_owned()),
            ),
            ("RUNIT_POOL_MAX_SIZE", Some("4".to_owned())),
            ("RUNIT_SESSION_KEY_FILE", Some("/tmp/runit-key".to_owned())),
            ("RUNIT_COOKIE_SECURE", Some("false".to_owned())),
            ("RUNIT_SAME_SITE", Some("Strict".to_owned())),
            ("RUNIT_ALLOW_EPHEMERAL", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://runit@localhost/runit");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(
            settings.session_toggles(),
            SessionToggles {
                key_file: Some(PathBuf::from("/tmp/runit-key")),
                cookie_secure: Some(false),
                same_site: Some("Strict".to_owned()),
                allow_ephemeral: Some(true),
            }
        );
    }

    #[rstest]
    #[case(Some("true"), Some(true))]
    #[case(Some("false"), Some(false))]
    #[case(None, None)]
    fn boolean_toggles_follow_the_environment(
        #[case] raw: Option<&str>,
        #[case] expected: Option<bool>,
    ) {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "RUNIT_COOKIE_SECURE" | "RUNIT_ALLOW_EPHEMERAL" => raw.map(str::to_owned),
                _ => None,
            };
            (name, value)
        }));

        let toggles = load_from_empty_args().session_toggles();
        assert_eq!(toggles.cookie_secure, expected);
        assert_eq!(toggles.allow_ephemeral, expected);
    }

    #[rstest]
    fn invalid_host_is_reported() {
        let _guard = lock_env([("RUNIT_HOST", Some("not-an-ip".to_owned()))]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
