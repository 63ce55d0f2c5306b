//! Mock Azure AI Foundry resource for integration tests
//!
//! Serves `/openai/v1/chat/completions` and `/openai/v1/embeddings` with
//! canned bodies and records every request it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use foundry_config::FoundryConfig;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use url::Url;

/// API key the mock accepts
pub const API_KEY: &str = "test-api-key";

/// API version the mock expects on every request
pub const API_VERSION: &str = "2024-10-21";

/// Request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path
    pub path: String,
    /// `api-version` query parameter
    pub api_version: Option<String>,
    /// `api-key` header
    pub api_key: Option<String>,
    /// `Authorization` header
    pub authorization: Option<String>,
    /// JSON body
    pub body: Value,
}

/// Canned behavior of the mock
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Body returned for non-streaming chat requests
    pub completion: Value,
    /// SSE `data` payloads returned for streaming chat requests, `[DONE]` is appended
    pub events: Vec<String>,
    /// Status and body returned instead of any success response
    pub failure: Option<(StatusCode, Value)>,
}

struct MockState {
    script: Script,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process mock resource bound to an ephemeral port
pub struct MockFoundry {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockFoundry {
    /// Start the mock with the given script
    pub async fn start(script: Script) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            script,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/openai/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/openai/v1/embeddings", routing::post(handle_embeddings))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Mock answering every chat request with `completion`
    pub async fn with_completion(completion: Value) -> anyhow::Result<Self> {
        Self::start(Script {
            completion,
            ..Script::default()
        })
        .await
    }

    /// Mock streaming each event as one SSE `data` line
    pub async fn with_events<I, S>(events: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::start(Script {
            events: events.into_iter().map(Into::into).collect(),
            ..Script::default()
        })
        .await
    }

    /// Resource endpoint, without the API base path
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("valid mock url")
    }

    /// Config authenticating with [`API_KEY`] and pinning [`API_VERSION`]
    pub fn config(&self) -> FoundryConfig {
        let mut config = FoundryConfig::with_api_key(self.endpoint(), SecretString::from(API_KEY));
        config.api_version = Some(API_VERSION.to_owned());
        config
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("lock poisoned").clone()
    }
}

impl Drop for MockFoundry {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(state: &MockState, path: &str, query: &Query<Vec<(String, String)>>, headers: &HeaderMap, body: &Value) {
    let header_value = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);

    state.requests.lock().expect("lock poisoned").push(RecordedRequest {
        path: path.to_owned(),
        api_version: query.iter().find(|(k, _)| k == "api-version").map(|(_, v)| v.clone()),
        api_key: header_value("api-key"),
        authorization: header_value("authorization"),
        body: body.clone(),
    });
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    query: Query<Vec<(String, String)>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "/openai/v1/chat/completions", &query, &headers, &body);

    if let Some((status, error)) = &state.script.failure {
        return (*status, Json(error.clone())).into_response();
    }

    if body["stream"] == json!(true) {
        let mut sse = String::new();

        for event in &state.script.events {
            sse.push_str(&format!("data: {event}\n\n"));
        }

        sse.push_str("data: [DONE]\n\n");

        return (StatusCode::OK, [(header::CONTENT_TYPE, "text/event-stream")], sse).into_response();
    }

    Json(state.script.completion.clone()).into_response()
}

/// Each vector encodes the input length so callers can check ordering
async fn handle_embeddings(
    State(state): State<Arc<MockState>>,
    query: Query<Vec<(String, String)>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "/openai/v1/embeddings", &query, &headers, &body);

    if let Some((status, error)) = &state.script.failure {
        return (*status, Json(error.clone())).into_response();
    }

    let length = body["input"].as_str().map_or(0, str::len);

    Json(json!({
        "object": "list",
        "data": [{ "object": "embedding", "embedding": [length, 0.5], "index": 0 }],
        "model": body["model"],
        "usage": { "prompt_tokens": 1, "total_tokens": 1 }
    }))
    .into_response()
}
