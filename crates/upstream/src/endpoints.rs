//! Kind-specific upstream endpoints.

use caselink_types::{BridgeError, ResourceKind, Result, endpoint_url};
use url::Url;

/// Upstream base URLs. Collections are served from a separate host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
    collections_base_url: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(base_url: impl Into<String>, collections_base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collections_base_url: collections_base_url.into(),
        }
    }

    /// Base used for case, profile and login requests.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the resource `id` of the given kind:
    ///
    /// - case: `{base}/case/{id}`
    /// - user: `{base}/profile/public/{username}`
    /// - collection: `{collections_base}/collections/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the configured base is not a usable
    /// URL, or [`BridgeError::IdentifierNotFound`] for the dot segments `.`
    /// and `..`, which would resolve to a different endpoint.
    pub fn resource_url(&self, kind: ResourceKind, id: &str) -> Result<Url> {
        if matches!(id, "." | "..") {
            return Err(BridgeError::IdentifierNotFound {
                kind,
                input: id.to_string(),
            });
        }
        match kind {
            ResourceKind::Case => endpoint_url(&self.base_url, &["case", id]),
            ResourceKind::User => endpoint_url(&self.base_url, &["profile", "public", id]),
            ResourceKind::Collection => {
                endpoint_url(&self.collections_base_url, &["collections", id])
            }
        }
    }
}
