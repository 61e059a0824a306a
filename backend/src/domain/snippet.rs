//! Snippet data model: saved code owned by one user and shared by slug.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::{InvalidSlug, Slug};
use super::user::{User, UserId, Username};

/// Maximum snippet name length, counted in characters after trimming.
pub const SNIPPET_NAME_MAX: usize = 50;
/// Maximum snippet body size in bytes.
pub const SNIPPET_CODE_MAX_BYTES: usize = 65_536;

/// Validation errors returned by the snippet constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    NameControlCharacters,
    CodeTooLarge { max: usize },
    InvalidSlug,
}

impl SnippetValidationError {
    /// Request field the failure belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } | Self::NameControlCharacters => "name",
            Self::CodeTooLarge { .. } => "code",
            Self::InvalidSlug => "slug",
        }
    }
}

impl fmt::Display for SnippetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "snippet id must be a positive integer"),
            Self::EmptyName => write!(f, "snippet name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "snippet name must be at most {max} characters")
            }
            Self::NameControlCharacters => {
                write!(f, "snippet name must not contain control characters")
            }
            Self::CodeTooLarge { max } => write!(f, "snippet code must be at most {max} bytes"),
            Self::InvalidSlug => write!(f, "{InvalidSlug}"),
        }
    }
}

impl std::error::Error for SnippetValidationError {}

impl From<InvalidSlug> for SnippetValidationError {
    fn from(_: InvalidSlug) -> Self {
        Self::InvalidSlug
    }
}

/// Store-assigned snippet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SnippetId(i64);

impl SnippetId {
    /// Validate and construct a [`SnippetId`]. Identifiers are positive.
    pub fn new(id: i64) -> Result<Self, SnippetValidationError> {
        if id <= 0 {
            return Err(SnippetValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SnippetId> for i64 {
    fn from(value: SnippetId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for SnippetId {
    type Error = SnippetValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a snippet, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnippetName(String);

impl SnippetName {
    /// Validate and construct a [`SnippetName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, SnippetValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SnippetValidationError::EmptyName);
        }
        if trimmed.chars().count() > SNIPPET_NAME_MAX {
            return Err(SnippetValidationError::NameTooLong {
                max: SNIPPET_NAME_MAX,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(SnippetValidationError::NameControlCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SnippetName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SnippetName> for String {
    fn from(value: SnippetName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SnippetName {
    type Error = SnippetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Snippet body. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnippetCode(String);

impl SnippetCode {
    /// Validate and construct a [`SnippetCode`].
    pub fn new(code: impl Into<String>) -> Result<Self, SnippetValidationError> {
        let code = code.into();
        if code.len() > SNIPPET_CODE_MAX_BYTES {
            return Err(SnippetValidationError::CodeTooLarge {
                max: SNIPPET_CODE_MAX_BYTES,
            });
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for SnippetCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SnippetCode> for String {
    fn from(value: SnippetCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for SnippetCode {
    type Error = SnippetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A saved snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 12)]
    pub id: SnippetId,
    /// Owning user.
    #[schema(value_type = i64, example = 42)]
    pub owner_id: UserId,
    /// Display name.
    #[schema(value_type = String, example = "fizzbuzz")]
    pub name: SnippetName,
    /// Source text.
    #[schema(value_type = String, example = "print('hi')")]
    pub code: SnippetCode,
    /// Share-link slug, unique per owner.
    #[schema(value_type = String, example = "k3v9x0qa")]
    pub slug: Slug,
}

/// Values needed to insert a snippet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    /// Owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: SnippetName,
    /// Source text.
    pub code: SnippetCode,
    /// Candidate slug; the store rejects duplicates per owner.
    pub slug: Slug,
}

/// Snippet joined with its owner's username, as listed in the back-office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetWithOwner {
    /// The snippet itself.
    #[serde(flatten)]
    pub snippet: Snippet,
    /// Owner's username.
    #[schema(value_type = String, example = "ada_l")]
    pub owner_username: Username,
}

/// User listed together with every snippet they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithSnippets {
    /// The account.
    #[serde(flatten)]
    pub user: User,
    /// Snippets owned by the account, ordered by id.
    pub snippets: Vec<Snippet>,
}
