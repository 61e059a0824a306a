//! Embedded PostgreSQL harness for the Diesel adapter suites.
//!
//! Every test gets a fresh database on one shared `pg-embed-setup-unpriv`
//! cluster, migrated with the same embedded migrations the server applies at
//! start-up. Where the cluster cannot start, set `SKIP_TEST_CLUSTER=1` to skip
//! instead of failing.
//!
//! Suites stay synchronous and drive async calls through the harness runtime;
//! cluster bootstrap must not run inside a Tokio runtime.

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use runit::domain::ports::{NewAccount, UserRepository};
use runit::domain::{Email, User, Username};
use runit::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use tokio::runtime::Runtime;

const CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// One migrated database with a pool and the runtime that drives it.
pub struct PgHarness {
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt}/{CLUSTER_RETRIES} failed: {err:?}");
                std::thread::sleep(RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}

fn setup() -> Result<PgHarness, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();
    run_migrations(&url).map_err(|err| err.to_string())?;

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(PgHarness {
        runtime,
        pool,
        _database: database,
    })
}

/// Provision a harness, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` is set.
///
/// # Panics
///
/// Panics when setup fails and skipping was not requested, so CI breakage is
/// not masked.
pub fn pg_harness() -> Option<PgHarness> {
    match setup() {
        Ok(harness) => Some(harness),
        Err(reason) if skip_requested() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}

/// Sign-up shaped account with a placeholder hash.
pub fn account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: Username::new(username).expect("valid username"),
        email: Email::new(email).expect("valid email"),
        password_hash: "$argon2id$placeholder".to_owned(),
    }
}

/// Insert `username` with a derived email through the Diesel adapter.
pub async fn seed_account(users: &DieselUserRepository, username: &str) -> User {
    users
        .create_account(&account(username, &format!("{username}@example.com")))
        .await
        .expect("seed account")
}
