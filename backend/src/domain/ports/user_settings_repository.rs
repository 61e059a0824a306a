//! Port for per-user settings persistence.

use async_trait::async_trait;

use crate::domain::{UserId, UserSettings};

use super::define_port_error;

define_port_error! {
    /// Errors raised by settings repository adapters.
    pub enum UserSettingsRepositoryError for "settings repository" {}
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    /// Fetch the settings row for a user. `None` when no row exists.
    async fn find(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserSettings>, UserSettingsRepositoryError>;

    /// Insert or replace the settings row for `settings.user_id`.
    async fn save(&self, settings: &UserSettings) -> Result<(), UserSettingsRepositoryError>;

    /// Remove the settings row for a user. Missing rows are ignored.
    async fn delete_for_user(&self, user_id: UserId) -> Result<(), UserSettingsRepositoryError>;
}
