//! Maps [`BridgeError`] to the synchronous reply of a slash command.
//!
//! Only errors raised before the command is acknowledged reach this path.
//! Slack shows the plain-text body to the invoking user as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use caselink_types::BridgeError;

/// Wrapper around [`BridgeError`] that implements [`IntoResponse`].
#[derive(Debug)]
pub struct ApiError(pub BridgeError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            BridgeError::Parse(_) | BridgeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BridgeError::TokenMismatch => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self.0, "rejecting slash command");
        (status, self.0.user_message()).into_response()
    }
}

impl From<BridgeError> for ApiError {
    fn from(e: BridgeError) -> Self {
        Self(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt as _;

    async fn extract_error_body(err: ApiError) -> (StatusCode, String) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_parse_error() {
        let (status, body) =
            extract_error_body(ApiError(BridgeError::Parse("not a form".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Failed to parse request");
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let (status, body) =
            extract_error_body(ApiError(BridgeError::InvalidRequest("text".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request");
    }

    #[tokio::test]
    async fn test_token_mismatch() {
        let (status, body) = extract_error_body(ApiError(BridgeError::TokenMismatch)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Tokens did not match");
    }

    #[tokio::test]
    async fn test_internal_error() {
        let (status, body) =
            extract_error_body(ApiError(BridgeError::Config("bad config".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("bad config"));
    }
}
