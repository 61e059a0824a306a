//! User settings domain services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::port_errors::map_settings_error;
use crate::domain::ports::{SettingsCommand, SettingsQuery, UserSettingsRepository};
use crate::domain::{Error, Language, UserId, UserSettings};

/// Settings service implementing the settings driving ports.
#[derive(Clone)]
pub struct SettingsService<R> {
    settings_repo: Arc<R>,
}

impl<R> SettingsService<R> {
    /// Create a new service with the given repository.
    pub fn new(settings_repo: Arc<R>) -> Self {
        Self { settings_repo }
    }
}

#[async_trait]
impl<R> SettingsQuery for SettingsService<R>
where
    R: UserSettingsRepository,
{
    async fn fetch_settings(&self, user_id: UserId) -> Result<UserSettings, Error> {
        if let Some(settings) = self
            .settings_repo
            .find(user_id)
            .await
            .map_err(map_settings_error)?
        {
            return Ok(settings);
        }

        let defaults = UserSettings::new_default(user_id);
        self.settings_repo
            .save(&defaults)
            .await
            .map_err(map_settings_error)?;
        Ok(defaults)
    }
}

#[async_trait]
impl<R> SettingsCommand for SettingsService<R>
where
    R: UserSettingsRepository,
{
    async fn update_language(
        &self,
        user_id: UserId,
        language: Language,
    ) -> Result<UserSettings, Error> {
        let settings = UserSettings { user_id, language };
        self.settings_repo
            .save(&settings)
            .await
            .map_err(map_settings_error)?;
        Ok(settings)
    }
}
