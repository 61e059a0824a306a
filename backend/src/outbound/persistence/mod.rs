//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Atomic multi-table writes**: account creation and deletion each run in
//!   a single transaction.
//! - **Strongly typed errors**: Database errors, including unique-constraint
//!   clashes, map to the port error types.
//!
//! # Example
//!
//! ```ignore
//! use runit::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/runit")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_snippet_repository;
mod diesel_user_repository;
mod diesel_user_settings_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_user_settings_repository::DieselUserSettingsRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
