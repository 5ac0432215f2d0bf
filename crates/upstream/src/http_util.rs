//! Shared HTTP helper for upstream reads.
//!
//! Centralises send → status-check so the client only deals with successful
//! responses or a typed error.

use caselink_types::{BridgeError, Result};
use reqwest::{Client, RequestBuilder, header};

/// Thin wrapper around a [`reqwest::Client`] that turns non-2xx responses
/// into [`BridgeError::Upstream`].
#[derive(Clone)]
pub struct UpstreamHttp {
    http: Client,
}

impl UpstreamHttp {
    /// Creates a new helper wrapping the given HTTP client.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Starts an authenticated JSON GET. The token is sent as-is in the
    /// `Authorization` header; the upstream does not expect a scheme prefix.
    #[must_use]
    pub fn authorized_get(&self, url: url::Url, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json");
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Sends a request and checks for success status.
    ///
    /// On non-2xx responses, reads the body text and returns
    /// [`BridgeError::Upstream`].
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Upstream` on non-success HTTP status codes,
    /// or `BridgeError::UpstreamUnavailable` if the request fails to send.
    pub async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(BridgeError::Upstream {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
