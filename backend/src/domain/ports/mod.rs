//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters. Driving ports (`*Command`, `*Query`) are implemented by the
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod accounts_query;
mod admin_command;
mod admin_query;
mod settings_command;
mod settings_query;
mod snippet_repository;
mod snippets_command;
mod snippets_query;
mod user_repository;
mod user_settings_repository;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccountsCommand, SignUpRequest, UpdateAccountRequest};
#[cfg(test)]
pub use accounts_query::MockAccountsQuery;
pub use accounts_query::AccountsQuery;
#[cfg(test)]
pub use admin_command::MockAdminCommand;
pub use admin_command::{AdminCommand, AdminUserUpdate};
#[cfg(test)]
pub use admin_query::MockAdminQuery;
pub use admin_query::AdminQuery;
#[cfg(test)]
pub use settings_command::MockSettingsCommand;
pub use settings_command::SettingsCommand;
#[cfg(test)]
pub use settings_query::MockSettingsQuery;
pub use settings_query::SettingsQuery;
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
pub use snippet_repository::{SnippetRepository, SnippetRepositoryError};
#[cfg(test)]
pub use snippets_command::MockSnippetsCommand;
pub use snippets_command::{SnippetDraft, SnippetsCommand};
#[cfg(test)]
pub use snippets_query::MockSnippetsQuery;
pub use snippets_query::SnippetsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewAccount, StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_settings_repository::MockUserSettingsRepository;
pub use user_settings_repository::{UserSettingsRepository, UserSettingsRepositoryError};
