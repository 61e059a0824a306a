//! Share-link slugs for snippets.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. Generated slugs use letters and digits only.

use std::fmt;

use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};

/// Length of server-generated slugs.
pub const GENERATED_SLUG_LEN: usize = 8;

/// Return `true` when `value` is a valid domain slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Raised when a slug contains disallowed characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("slug must contain only lowercase letters, digits, or hyphens")]
pub struct InvalidSlug;

/// URL-safe snippet identifier, unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`].
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidSlug> {
        let value = value.into();
        if !is_valid_slug(&value) {
            return Err(InvalidSlug);
        }
        Ok(Self(value))
    }

    /// Generate a random slug of [`GENERATED_SLUG_LEN`] lowercase alphanumerics.
    pub fn generate() -> Self {
        let value = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SLUG_LEN)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect();
        Self(value)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = InvalidSlug;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
