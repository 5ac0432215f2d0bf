//! Email/password login against the upstream API.
//!
//! `POST {base}/auth/login` with `{"email", "password"}`; a successful reply
//! carries the bearer token in its `Token` field.
use caselink_types::{BridgeError, Credential, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Path segments of the login endpoint, relative to the upstream base.
pub const LOGIN_PATH: &[&str] = &["auth", "login"];

/// JSON body sent to the login endpoint.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    #[must_use]
    pub fn new(credential: &'a Credential) -> Self {
        Self {
            email: &credential.email,
            password: credential.password(),
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "Token", alias = "token")]
    token: Option<String>,
}

/// Builds the login endpoint for the given upstream base.
///
/// # Errors
///
/// Returns [`BridgeError::Config`] if `base` is not a usable URL.
pub fn login_url(base: &str) -> Result<Url> {
    caselink_types::endpoint_url(base, LOGIN_PATH)
}

/// Extracts the bearer token from a login response body.
///
/// # Errors
///
/// Returns [`BridgeError::Decode`] if the body is not JSON or carries no
/// non-empty token.
pub fn parse_login_response(body: &[u8]) -> Result<String> {
    let resp: LoginResponse = serde_json::from_slice(body)?;
    match resp.token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(BridgeError::Decode(
            "login response did not contain a token".to_string(),
        )),
    }
}

/// Maps a non-success login status to an error.
///
/// Client-error statuses mean the credentials were rejected; anything else
/// is an upstream fault that says nothing about the credentials.
#[must_use]
pub fn classify_login_failure(status: u16, body: String) -> BridgeError {
    match status {
        400 | 401 | 403 | 404 | 422 => BridgeError::InvalidCredentials { status },
        _ => BridgeError::Upstream { status, body },
    }
}
