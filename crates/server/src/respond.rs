//! Delivers messages to a slash command's `response_url`.

use caselink_format::SlackMessage;
use caselink_types::{BridgeError, Result};

/// POSTs `message` as JSON to `response_url`.
///
/// # Errors
///
/// Returns [`BridgeError::Chat`] if the URL cannot be reached or the chat
/// platform answers with a non-success status.
pub async fn post_message(
    http: &reqwest::Client,
    response_url: &str,
    message: &SlackMessage,
) -> Result<()> {
    let resp = http
        .post(response_url)
        .json(message)
        .send()
        .await
        .map_err(|e| BridgeError::Chat(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), %body, "chat platform rejected message");
        return Err(BridgeError::Chat(format!("response_url returned {status}: {body}")));
    }
    Ok(())
}
