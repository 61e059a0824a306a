//! Driving port for changing the signed-in user's settings.

use async_trait::async_trait;

use crate::domain::{Error, Language, UserId, UserSettings};

/// Domain use-case port for settings updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsCommand: Send + Sync {
    /// Store a new interface language.
    async fn update_language(
        &self,
        user_id: UserId,
        language: Language,
    ) -> Result<UserSettings, Error>;
}
