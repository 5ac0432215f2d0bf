//! Unified error type for the caselink workspace.

use crate::ResourceKind;
use thiserror::Error;

/// Enumerates all error kinds that can occur across caselink crates.
///
/// `Display` is the diagnostic text written to the log; the text shown to
/// the person who ran the command comes from [`BridgeError::user_message`].
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The inbound slash-command form could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The inbound form decoded but a required field is empty.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The inbound verification token does not match the configured value.
    #[error("verification token mismatch")]
    TokenMismatch,

    /// No identifier could be resolved from the command text.
    #[error("could not resolve {} from {input:?}", kind.identifier_label())]
    IdentifierNotFound { kind: ResourceKind, input: String },

    /// Transport failure reaching the upstream API.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The bearer token was rejected and re-authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The login endpoint rejected the configured credentials.
    #[error("incorrect credentials: login returned status {status}")]
    InvalidCredentials { status: u16 },

    /// The upstream API has no resource with this identifier.
    #[error("{kind} {id:?} not found upstream")]
    NotFound { kind: ResourceKind, id: String },

    /// The upstream API returned a non-success status.
    #[error("upstream error: status={status}, body={body}")]
    Upstream { status: u16, body: String },

    /// An upstream or chat-platform body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Delivering a message to the chat platform failed.
    #[error("chat delivery error: {0}")]
    Chat(String),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for BridgeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::UpstreamUnavailable(e.to_string())
        }
    }
}

impl BridgeError {
    /// Text suitable for showing to the Slack user who issued the command.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) => "Failed to parse request".to_string(),
            Self::InvalidRequest(_) => "Invalid request".to_string(),
            Self::TokenMismatch => "Tokens did not match".to_string(),
            Self::IdentifierNotFound {
                kind: ResourceKind::User,
                ..
            } => "Could not parse username, try again".to_string(),
            Self::IdentifierNotFound { kind, .. } => {
                format!("Could not find the {}, try again", kind.identifier_label())
            }
            Self::UpstreamUnavailable(_) => {
                "Failed to connect to Figure 1 API, try again later".to_string()
            }
            Self::Unauthorized(_) | Self::InvalidCredentials { .. } => {
                "Failed to refresh auth token, please try again.".to_string()
            }
            Self::NotFound { kind, .. } => format!("Could not find that {kind}"),
            Self::Upstream { .. } => {
                "Failed to retrieve content, please try again later".to_string()
            }
            Self::Decode(_) => "Received an unexpected response from Figure 1".to_string(),
            Self::Chat(_) | Self::Config(_) => "Error fetching content".to_string(),
        }
    }

    /// Returns `true` if the error was raised before the command could be
    /// acknowledged and therefore belongs in the synchronous HTTP response.
    #[must_use]
    pub fn is_pre_acknowledgement(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::InvalidRequest(_) | Self::TokenMismatch
        )
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BridgeError>;
