//! Driving port for reading the signed-in user's settings.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserSettings};

/// Domain use-case port for settings lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsQuery: Send + Sync {
    /// Settings of `user_id`, initialising defaults when no row exists yet.
    async fn fetch_settings(&self, user_id: UserId) -> Result<UserSettings, Error>;
}
