//! Slash-command orchestration: verify, acknowledge, then resolve in the
//! background and deliver the result to `response_url`.

use crate::{AppState, error::ApiError, respond};
use axum::{
    Json,
    extract::{Form, State, rejection::FormRejection},
};
use caselink_format::{Attachment, SlackMessage};
use caselink_types::{BridgeError, ResourceKind, Result};
use serde::Deserialize;
use std::{fmt, sync::Arc};

/// Form body Slack posts for every slash command.
#[derive(Clone, Default, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub response_url: String,
}

impl fmt::Debug for SlashCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlashCommand")
            .field("token", &"[REDACTED]")
            .field("channel_id", &self.channel_id)
            .field("user_name", &self.user_name)
            .field("text", &self.text)
            .field("response_url", &self.response_url)
            .finish()
    }
}

impl SlashCommand {
    /// Checks the verification token, then that the fields needed to answer
    /// (including where to answer) are present.
    fn verify(&self, expected_token: &str) -> Result<()> {
        if self.token != expected_token {
            return Err(BridgeError::TokenMismatch);
        }
        let missing = [
            ("channel_id", &self.channel_id),
            ("user_name", &self.user_name),
            ("text", &self.text),
            ("response_url", &self.response_url),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());
        match missing {
            Some((field, _)) => Err(BridgeError::InvalidRequest(format!("{field} is empty"))),
            None => Ok(()),
        }
    }
}

/// Handles `POST /case`.
///
/// # Errors
///
/// Returns [`ApiError`] if the form is malformed, the token does not match,
/// or a required field is empty.
pub async fn case(
    state: State<Arc<AppState>>,
    form: std::result::Result<Form<SlashCommand>, FormRejection>,
) -> std::result::Result<Json<SlackMessage>, ApiError> {
    acknowledge(state, ResourceKind::Case, form)
}

/// Handles `POST /user`.
///
/// # Errors
///
/// Same as [`case`].
pub async fn user(
    state: State<Arc<AppState>>,
    form: std::result::Result<Form<SlashCommand>, FormRejection>,
) -> std::result::Result<Json<SlackMessage>, ApiError> {
    acknowledge(state, ResourceKind::User, form)
}

/// Handles `POST /collection`.
///
/// # Errors
///
/// Same as [`case`].
pub async fn collection(
    state: State<Arc<AppState>>,
    form: std::result::Result<Form<SlashCommand>, FormRejection>,
) -> std::result::Result<Json<SlackMessage>, ApiError> {
    acknowledge(state, ResourceKind::Collection, form)
}

fn acknowledge(
    State(state): State<Arc<AppState>>,
    kind: ResourceKind,
    form: std::result::Result<Form<SlashCommand>, FormRejection>,
) -> std::result::Result<Json<SlackMessage>, ApiError> {
    let Form(command) = form.map_err(|e| BridgeError::Parse(e.body_text()))?;
    command.verify(&state.config.verification_token)?;

    tracing::info!(
        %kind,
        user = %command.user_name,
        channel = %command.channel_id,
        text = %command.text,
        "slash command accepted"
    );
    tokio::spawn(run(state, kind, command));

    Ok(Json(SlackMessage::acknowledgement()))
}

/// Resolves the command and posts the outcome to its `response_url`.
///
/// Every failure is logged and turned into an ephemeral message; a failed
/// delivery is only logged.
async fn run(state: Arc<AppState>, kind: ResourceKind, command: SlashCommand) {
    let message = match resolve(&state, kind, &command).await {
        Ok(attachments) => SlackMessage::in_channel(attachments),
        Err(e) => {
            tracing::error!(
                %kind,
                user = %command.user_name,
                text = %command.text,
                error = %e,
                "failed to resolve slash command"
            );
            SlackMessage::ephemeral(e.user_message())
        }
    };

    if let Err(e) = respond::post_message(&state.http, &command.response_url, &message).await {
        tracing::error!(%kind, error = %e, "failed to deliver message to response_url");
    }
}

async fn resolve(
    state: &AppState,
    kind: ResourceKind,
    command: &SlashCommand,
) -> Result<Vec<Attachment>> {
    let id = caselink_extract::extract_or_err(kind, command.text.trim())?;
    let resource = state.fetcher.fetch(kind, &id).await?;
    tracing::debug!(%kind, %id, "resource fetched");
    Ok(caselink_format::format(&resource, &command.user_name))
}
