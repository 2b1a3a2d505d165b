//! HTTP API for the question-answering service.
//!
//! One route, two behaviors: `OPTIONS /ask` answers the cross-origin
//! preflight with fixed headers and an empty body; `POST /ask` runs the
//! agent, persists the interaction, and returns `{question, answer}`.

pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::Agent;
use crate::config::Config;
use crate::llm::{LlmClient, OpenAiClient};
use crate::store::{Interaction, InteractionStore, SqliteStore};
use crate::tools::ToolRegistry;

use types::{AskRequest, AskResponse, HealthResponse};

/// Methods value advertised on the preflight response.
const PREFLIGHT_METHODS: &str = "POST,OPTIONS";

/// Methods value advertised on the normal response.
const RESPONSE_METHODS: &str = "OPTIONS,POST";

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LlmClient>,
    pub store: Arc<dyn InteractionStore>,
}

/// Errors surfaced by the request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was not valid JSON.
    BadRequest(String),

    /// A downstream fault (agent, model, store). No structured body.
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Failures are undifferentiated: status only, no error body.
            Self::BadRequest(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                StatusCode::BAD_REQUEST.into_response()
            }
            Self::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// The three fixed cross-origin headers.
fn cors_headers(methods: &'static str) -> [(&'static str, &'static str); 3] {
    [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-headers", "Content-Type"),
        ("access-control-allow-methods", methods),
    ]
}

/// Best-effort client address: `X-Forwarded-For` first, then the peer
/// socket address, then `"unknown"`.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask).options(preflight))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with production collaborators.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.database_path)?;
    let llm = OpenAiClient::new(config.openai_api_key.clone());

    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        store: Arc::new(store),
    };

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// `OPTIONS /ask` - cross-origin preflight. Empty body, fixed headers,
/// no persistence write.
async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers(PREFLIGHT_METHODS))
}

/// `POST /ask` - answer a question.
///
/// An absent or empty body defaults to `{}`; an absent `question` is
/// forwarded to the agent as-is. Exactly one interaction record is
/// written once the agent has answered.
async fn ask(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: AskRequest = if body.is_empty() {
        AskRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    let source_ip = client_ip(&headers, Some(peer));
    info!(question = ?request.question, %source_ip, "Handling question");

    let agent = Agent::new(
        state.llm.clone(),
        ToolRegistry::new(state.config.vt_api_key.clone()),
        &state.config.model,
        state.config.max_iterations,
    );

    let answer = agent.answer(request.question.as_deref()).await?;

    let interaction = Interaction::new(request.question.clone(), answer.clone(), source_ip);
    state.store.record(&interaction).await?;

    Ok((
        StatusCode::OK,
        cors_headers(RESPONSE_METHODS),
        Json(AskResponse {
            question: request.question,
            answer,
        }),
    )
        .into_response())
}

/// `GET /health` - liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AssistantMessage, ChatMessage};
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// LLM stub that always answers with the same text.
    struct StubLlm(String);

    #[async_trait]
    impl LlmClient for StubLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> anyhow::Result<AssistantMessage> {
            Ok(AssistantMessage {
                content: Some(self.0.clone()),
                tool_calls: None,
            })
        }
    }

    /// LLM stub that always fails, simulating a model-side fault.
    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> anyhow::Result<AssistantMessage> {
            Err(anyhow::anyhow!("model unavailable"))
        }
    }

    fn test_state(llm: Arc<dyn LlmClient>) -> (AppState, InMemoryStore) {
        let store = InMemoryStore::new();
        let state = AppState {
            config: Config::new("test-key".to_string(), "test-model".to_string()),
            llm,
            store: Arc::new(store.clone()),
        };
        (state, store)
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 55000)))
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn preflight_returns_exactly_the_three_cors_headers() {
        let response = preflight().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers().clone();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "POST,OPTIONS");

        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn post_answers_and_writes_one_record() {
        let (state, store) = test_state(Arc::new(StubLlm("hi there".to_string())));

        let response = ask(
            State(state),
            peer(),
            HeaderMap::new(),
            Bytes::from(r#"{"question": "hello"}"#),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "OPTIONS,POST"
        );
        assert_eq!(response.headers()["access-control-allow-origin"], "*");

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({ "question": "hello", "answer": "hi there" }));

        let records = store.recorded().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question.as_deref(), Some("hello"));
        assert_eq!(records[0].answer, "hi there");
        assert_eq!(records[0].source_ip, "192.168.1.7");
        assert!(!records[0].request_id.is_nil());
    }

    #[tokio::test]
    async fn empty_body_defaults_to_absent_question() {
        let (state, store) = test_state(Arc::new(StubLlm("anyway".to_string())));

        let response = ask(State(state), peer(), HeaderMap::new(), Bytes::new())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({ "question": null, "answer": "anyway" }));

        let records = store.recorded().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, None);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_without_a_record() {
        let (state, store) = test_state(Arc::new(StubLlm("never".to_string())));

        let err = ask(
            State(state),
            peer(),
            HeaderMap::new(),
            Bytes::from("{not json"),
        )
        .await
        .err()
        .expect("malformed body should fail");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
        assert!(store.recorded().await.is_empty());
    }

    #[tokio::test]
    async fn agent_fault_surfaces_as_500_without_a_record() {
        let (state, store) = test_state(Arc::new(FailingLlm));

        let err = ask(
            State(state),
            peer(),
            HeaderMap::new(),
            Bytes::from(r#"{"question": "hello"}"#),
        )
        .await
        .err()
        .expect("agent fault should fail the request");

        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(store.recorded().await.is_empty());
    }

    #[tokio::test]
    async fn forwarded_header_takes_precedence_for_source_ip() {
        let (state, store) = test_state(Arc::new(StubLlm("ok".to_string())));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());

        ask(State(state), peer(), headers, Bytes::from("{}"))
            .await
            .unwrap();

        assert_eq!(store.recorded().await[0].source_ip, "203.0.113.9");
    }

    #[test]
    fn client_ip_falls_back_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
