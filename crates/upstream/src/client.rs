//! Authenticated resource client with a single re-login on `401`.
//!
//! A rejected token triggers exactly one refresh through the
//! [`TokenManager`] followed by exactly one retried request. A second `401`
//! is reported as [`BridgeError::Unauthorized`] instead of looping.

use crate::{endpoints::Endpoints, http_util::UpstreamHttp};
use async_trait::async_trait;
use caselink_auth::TokenManager;
use caselink_types::{BridgeError, Resource, ResourceFetcher, ResourceKind, Result};
use std::sync::Arc;

/// How many times a `401` may trigger a re-login within one fetch.
const MAX_AUTH_RETRIES: u32 = 1;

/// Fetches cases, profiles and collections from the upstream API.
pub struct ResourceClient {
    http: UpstreamHttp,
    endpoints: Endpoints,
    auth: Arc<TokenManager>,
}

impl ResourceClient {
    /// Creates a client sharing `auth`'s bearer token.
    #[must_use]
    pub fn new(http: reqwest::Client, endpoints: Endpoints, auth: Arc<TokenManager>) -> Self {
        Self {
            http: UpstreamHttp::new(http),
            endpoints,
            auth,
        }
    }

    /// The token manager used for re-authentication.
    #[must_use]
    pub fn auth(&self) -> &Arc<TokenManager> {
        &self.auth
    }
}

#[async_trait]
impl ResourceFetcher for ResourceClient {
    async fn fetch(&self, kind: ResourceKind, id: &str) -> Result<Resource> {
        let url = self.endpoints.resource_url(kind, id)?;

        for attempt in 0..=MAX_AUTH_RETRIES {
            let token = self.auth.current();
            let request = self.http.authorized_get(url.clone(), token.as_deref());

            match self.http.send(request).await {
                Ok(resp) => {
                    let body = resp.bytes().await?;
                    return Resource::decode(kind, &body).inspect_err(|e| {
                        tracing::warn!(%kind, id, error = %e, "failed to decode upstream body");
                    });
                }
                Err(BridgeError::Upstream { status: 401, .. }) if attempt < MAX_AUTH_RETRIES => {
                    tracing::info!(%kind, id, "bearer token rejected, logging in again");
                    self.auth.refresh().await.map_err(|e| {
                        tracing::warn!(error = %e, "re-authentication failed");
                        BridgeError::Unauthorized(format!("token refresh failed: {e}"))
                    })?;
                }
                Err(BridgeError::Upstream { status: 404, .. }) => {
                    tracing::info!(%kind, id, "no such {kind} upstream");
                    return Err(BridgeError::NotFound {
                        kind,
                        id: id.to_string(),
                    });
                }
                Err(BridgeError::Upstream { status: 401, body }) => {
                    tracing::warn!(%kind, id, "token rejected again after re-login");
                    return Err(BridgeError::Unauthorized(format!(
                        "token rejected after re-login: {body}"
                    )));
                }
                Err(e) => {
                    tracing::warn!(%kind, id, error = %e, "failed to retrieve {kind}");
                    return Err(e);
                }
            }
        }

        Err(BridgeError::Unauthorized(
            "re-authentication budget exhausted".to_string(),
        ))
    }
}
