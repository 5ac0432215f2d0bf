//! Owns the upstream credentials and refreshes the shared bearer token.
//!
//! Responsibilities:
//! - Log in with the configured credentials and store the returned token.
//! - Expose the shared [`BearerToken`] so request paths can read it without
//!   waiting on a refresh.
//!
//! Refreshes are not serialised. Two requests that hit an expired token at the
//! same time both log in; the second login simply overwrites the first.
use crate::login::{self, LoginRequest};
use caselink_types::{BearerToken, BridgeError, Credential, Result};
use std::sync::Arc;
use url::Url;

pub struct TokenManager {
    http: reqwest::Client,
    login_url: Url,
    credential: Credential,
    token: Arc<BearerToken>,
}

impl TokenManager {
    /// Creates a manager logging in against `{base_url}/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if `base_url` is not a usable URL.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        credential: Credential,
        token: Arc<BearerToken>,
    ) -> Result<Self> {
        Ok(Self {
            http,
            login_url: login::login_url(base_url)?,
            credential,
            token,
        })
    }

    /// The shared token holder updated by this manager.
    #[must_use]
    pub fn token(&self) -> &Arc<BearerToken> {
        &self.token
    }

    /// Current bearer token value, if a login has succeeded.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.token.get()
    }

    /// Logs in and replaces the shared token.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::UpstreamUnavailable`] if the login endpoint cannot be reached.
    /// - [`BridgeError::InvalidCredentials`] if the credentials were rejected.
    /// - [`BridgeError::Upstream`] for any other non-success status.
    /// - [`BridgeError::Decode`] if the response carries no token.
    pub async fn refresh(&self) -> Result<()> {
        let resp = self
            .http
            .post(self.login_url.clone())
            .json(&LoginRequest::new(&self.credential))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to reach login endpoint");
                BridgeError::UpstreamUnavailable(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = login::classify_login_failure(status.as_u16(), body);
            tracing::warn!(status = status.as_u16(), error = %err, "login rejected");
            return Err(err);
        }

        let body = resp.bytes().await?;
        let token = login::parse_login_response(&body)?;
        self.token.replace(token);
        tracing::info!(
            email = %self.credential.email,
            generation = self.token.generation(),
            "bearer token refreshed"
        );
        Ok(())
    }

    /// Start-up login. Identical to [`refresh`](Self::refresh), but the caller
    /// is expected to treat any error as fatal: the bridge cannot serve a
    /// single command without a token.
    ///
    /// # Errors
    ///
    /// Same as [`refresh`](Self::refresh).
    pub async fn authenticate(&self) -> Result<()> {
        self.refresh().await.inspect_err(|e| {
            if matches!(e, BridgeError::InvalidCredentials { .. }) {
                tracing::error!("failed to retrieve bearer token: incorrect credentials");
            } else {
                tracing::error!(error = %e, "initial authentication failed");
            }
        })
    }
}
