//! Per-user interface settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Interface language preference.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Russian.
    Ru,
}

impl Language {
    /// Stable two-letter code stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a language code is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("language must be one of: en, ru (got {0:?})")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(UnsupportedLanguage(value.to_owned())),
        }
    }
}

/// Settings row; exactly one per user, created at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Owning user.
    #[schema(value_type = i64, example = 42)]
    pub user_id: UserId,
    /// Interface language.
    pub language: Language,
}

impl UserSettings {
    /// Default settings for a freshly created account.
    pub fn new_default(user_id: UserId) -> Self {
        Self {
            user_id,
            language: Language::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Language::En)]
    #[case(" RU ", Language::Ru)]
    fn parses_supported_codes(#[case] raw: &str, #[case] expected: Language) {
        assert_eq!(raw.parse::<Language>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_codes() {
        assert!("de".parse::<Language>().is_err());
    }

    #[rstest]
    fn defaults_to_english() {
        let user_id = UserId::new(1).expect("valid id");
        let settings = UserSettings::new_default(user_id);
        assert_eq!(settings.language, Language::En);
        assert_eq!(
            serde_json::to_value(settings).expect("serialise"),
            serde_json::json!({ "userId": 1, "language": "en" })
        );
    }
}
