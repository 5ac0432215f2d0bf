//! Async traits shared across caselink crates.
//!
//! Cross-crate seams live here so that the server depends only on
//! `caselink-types`, not on the concrete upstream client.

use crate::{Resource, ResourceKind, error::Result};
use async_trait::async_trait;

/// Fetches a resource from the upstream API by kind and identifier.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch and decode the resource identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`](crate::BridgeError) on transport failure,
    /// authorization failure after one re-login, non-success status, or an
    /// undecodable body.
    async fn fetch(&self, kind: ResourceKind, id: &str) -> Result<Resource>;
}
