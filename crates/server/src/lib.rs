//! HTTP layer: axum router, slash-command handlers and error mapping.
//!
//! One POST route per resource kind (`/case`, `/user`, `/collection`) plus
//! `GET /health`. Commands are acknowledged immediately and answered later
//! through the `response_url` Slack supplies.

mod command;
mod error;
pub mod respond;

pub use command::SlashCommand;
pub use error::ApiError;

use axum::{
    Json, Router,
    routing::{get, post},
};
use caselink_config::Config;
use caselink_types::ResourceFetcher;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state passed to all route handlers.
pub struct AppState {
    /// Loaded once at startup.
    pub config: Arc<Config>,
    /// Resolves identifiers to upstream resources.
    pub fetcher: Arc<dyn ResourceFetcher>,
    /// HTTP client for posting to `response_url`.
    pub http: reqwest::Client,
}

impl AppState {
    /// Creates a new shared application state wrapped in an `Arc`.
    pub fn new(
        config: Arc<Config>,
        fetcher: Arc<dyn ResourceFetcher>,
        http: reqwest::Client,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            fetcher,
            http,
        })
    }
}

/// Build the full axum router.
///
/// Routes:
/// - POST /case
/// - POST /user
/// - POST /collection
/// - GET  /health
pub fn make_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/case", post(command::case))
        .route("/user", post(command::user))
        .route("/collection", post(command::collection))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use caselink_types::{
        BridgeError, Case, CaseAuthor, Resource, ResourceKind, Result as BridgeResult,
    };
    use http_body_util::BodyExt as _;
    use std::{sync::Mutex, time::Duration};
    use tokio::sync::mpsc;
    use tower::ServiceExt as _;

    const TOKEN: &str = "verify-me";
    const CASE_ID: &str = "59076d6324d11b594b2dff1d";

    /// Returns a canned case for any request and records what was asked for.
    #[derive(Default)]
    struct FakeFetcher {
        calls: Mutex<Vec<(ResourceKind, String)>>,
        not_found: bool,
    }

    #[async_trait]
    impl ResourceFetcher for FakeFetcher {
        async fn fetch(&self, kind: ResourceKind, id: &str) -> BridgeResult<Resource> {
            self.calls.lock().unwrap().push((kind, id.to_string()));
            if self.not_found {
                return Err(BridgeError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Ok(Resource::Case(Case {
                id: id.to_string(),
                caption: "Chest x-ray".into(),
                author: CaseAuthor {
                    username: "ccovic".into(),
                    ..CaseAuthor::default()
                },
                ..Case::default()
            }))
        }
    }

    /// Mock `response_url` that forwards every posted body to the test.
    async fn spawn_hook() -> (String, mpsc::UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let router = Router::new().route(
            "/hook",
            post(move |Json(body): Json<Value>| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(body);
                    StatusCode::OK
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (format!("http://{addr}/hook"), rx)
    }

    fn make_state(fetcher: Arc<FakeFetcher>) -> Arc<AppState> {
        let config = Config {
            verification_token: TOKEN.into(),
            ..Config::default()
        };
        AppState::new(Arc::new(config), fetcher, reqwest::Client::new())
    }

    fn form(token: &str, text: &str, response_url: &str) -> String {
        serde_urlencoded::to_string([
            ("token", token),
            ("channel_id", "C024BE91L"),
            ("user_name", "jdoe"),
            ("text", text),
            ("response_url", response_url),
        ])
        .unwrap()
    }

    fn post_form(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn next_post(rx: &mut mpsc::UnboundedReceiver<Value>) -> Value {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("response_url was never called")
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = make_router(make_state(Arc::default()));
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_case_command_acknowledges_then_posts_attachments() {
        let fetcher = Arc::new(FakeFetcher::default());
        let (hook, mut rx) = spawn_hook().await;
        let app = make_router(make_state(Arc::clone(&fetcher)));

        let text = format!("  https://app.figure1.com/rd/image?imageid={CASE_ID}  ");
        let resp = app
            .oneshot(post_form("/case", form(TOKEN, &text, &hook)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let ack: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(ack, json!({"response_type": "in_channel"}));

        let posted = next_post(&mut rx).await;
        assert_eq!(posted["response_type"], "in_channel");
        let sections = posted["attachments"].as_array().unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0]["title"], "ccovic");
        assert_eq!(sections[2]["footer"], "posted by @jdoe");

        assert_eq!(
            *fetcher.calls.lock().unwrap(),
            vec![(ResourceKind::Case, CASE_ID.to_string())]
        );
    }

    #[tokio::test]
    async fn test_unresolvable_text_posts_ephemeral_error() {
        let fetcher = Arc::new(FakeFetcher::default());
        let (hook, mut rx) = spawn_hook().await;
        let app = make_router(make_state(Arc::clone(&fetcher)));

        let resp = app
            .oneshot(post_form("/collection", form(TOKEN, "fractures", &hook)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let posted = next_post(&mut rx).await;
        assert_eq!(
            posted,
            json!({
                "response_type": "ephemeral",
                "text": "Could not find the collection id, try again"
            })
        );
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_posts_ephemeral_error() {
        let fetcher = Arc::new(FakeFetcher {
            not_found: true,
            ..FakeFetcher::default()
        });
        let (hook, mut rx) = spawn_hook().await;
        let app = make_router(make_state(fetcher));

        app.oneshot(post_form("/user", form(TOKEN, "penguinophile", &hook)))
            .await
            .unwrap();

        let posted = next_post(&mut rx).await;
        assert_eq!(posted["response_type"], "ephemeral");
        assert_eq!(posted["text"], "Could not find that user");
    }

    #[tokio::test]
    async fn test_token_mismatch_is_rejected_synchronously() {
        let fetcher = Arc::new(FakeFetcher::default());
        let app = make_router(make_state(Arc::clone(&fetcher)));

        let resp = app
            .oneshot(post_form("/case", form("wrong", CASE_ID, "http://unused")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(resp).await, "Tokens did not match");
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid_request() {
        let app = make_router(make_state(Arc::default()));
        let resp = app
            .oneshot(post_form("/case", form(TOKEN, "", "http://unused")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Invalid request");
    }

    #[tokio::test]
    async fn test_missing_response_url_is_invalid_request() {
        let fetcher = Arc::new(FakeFetcher::default());
        let app = make_router(make_state(Arc::clone(&fetcher)));
        let resp = app
            .oneshot(post_form("/case", form(TOKEN, CASE_ID, "")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Invalid request");
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_form_body_is_parse_error() {
        let app = make_router(make_state(Arc::default()));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/case")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"token":"verify-me"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(resp).await, "Failed to parse request");
    }

    #[tokio::test]
    async fn test_get_on_command_route_not_allowed() {
        let app = make_router(make_state(Arc::default()));
        let resp = app
            .oneshot(Request::builder().uri("/case").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
