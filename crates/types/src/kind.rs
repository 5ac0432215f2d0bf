//! Resource kinds exposed through slash commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The upstream resource a slash command refers to.
///
/// The kind decides which upstream endpoint is queried and which identifier
/// shape the extractor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Case,
    User,
    Collection,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Case => write!(f, "case"),
            Self::User => write!(f, "user"),
            Self::Collection => write!(f, "collection"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::BridgeError;

    /// Parse a kind name (or the plural/alias used in command names).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Parse`](crate::BridgeError::Parse) if the string
    /// does not name a known kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "case" | "cases" | "image" => Ok(Self::Case),
            "user" | "users" | "profile" => Ok(Self::User),
            "collection" | "collections" => Ok(Self::Collection),
            other => Err(crate::BridgeError::Parse(format!(
                "unknown resource kind: {other}"
            ))),
        }
    }
}

impl ResourceKind {
    /// Returns all known kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Case, Self::User, Self::Collection]
    }

    /// Noun used in user-facing messages ("case id", "username", ...).
    #[must_use]
    pub fn identifier_label(self) -> &'static str {
        match self {
            Self::Case => "case id",
            Self::User => "username",
            Self::Collection => "collection id",
        }
    }
}
