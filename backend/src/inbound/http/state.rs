//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AccountsQuery, AdminCommand, AdminQuery, SettingsCommand, SettingsQuery,
    SnippetRepository, SnippetsCommand, SnippetsQuery, UserRepository, UserSettingsRepository,
};
use crate::domain::{AccountService, AdminService, SettingsService, SnippetService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub accounts_query: Arc<dyn AccountsQuery>,
    pub snippets: Arc<dyn SnippetsCommand>,
    pub snippets_query: Arc<dyn SnippetsQuery>,
    pub settings: Arc<dyn SettingsCommand>,
    pub settings_query: Arc<dyn SettingsQuery>,
    pub admin: Arc<dyn AdminCommand>,
    pub admin_query: Arc<dyn AdminQuery>,
}

impl HttpState {
    /// Wire every domain service over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use runit::inbound::http::state::HttpState;
    /// use runit::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn from_repositories<U, S, T>(users: Arc<U>, snippets: Arc<S>, settings: Arc<T>) -> Self
    where
        U: UserRepository + 'static,
        S: SnippetRepository + 'static,
        T: UserSettingsRepository + 'static,
    {
        let accounts = Arc::new(AccountService::new(users.clone()));
        let snippet_service = Arc::new(SnippetService::new(snippets.clone()));
        let settings_service = Arc::new(SettingsService::new(settings.clone()));
        let admin = Arc::new(AdminService::new(users, snippets, settings));

        Self {
            accounts: accounts.clone(),
            accounts_query: accounts,
            snippets: snippet_service.clone(),
            snippets_query: snippet_service,
            settings: settings_service.clone(),
            settings_query: settings_service,
            admin: admin.clone(),
            admin_query: admin,
        }
    }
}
