//! Chat API endpoint
//!
//! POST /api/v1/chat - Run one message through the orchestrator
//!
//! The orchestrator persists nothing. This wrapper is its caller, so it owns
//! the per-session conversation history (in memory, bounded).

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use forefront_core::roles::Citation;
use forefront_core::{
    ConversationTurn, ExecuteRequest, ExecutionStatus, Intent, Orchestrator,
    OrchestratorResponse, ResponseBody, ResponseKind, StepResult, UserFriendlyError, Workflow,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::ApiResponse;

/// Conversation turns of one session. The lock is held for a whole request,
/// so requests within one session run one at a time.
type SessionTurns = Arc<Mutex<Vec<ConversationTurn>>>;

struct SessionEntry {
    turns: SessionTurns,
    last_used: u64,
}

/// In-memory sessions with least-recently-used eviction
#[derive(Default)]
struct SessionStore {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

impl SessionStore {
    fn checkout(&mut self, session_id: &str, max_sessions: usize) -> SessionTurns {
        self.clock += 1;
        let now = self.clock;

        if let Some(entry) = self.entries.get_mut(session_id) {
            entry.last_used = now;
            return entry.turns.clone();
        }

        while self.entries.len() >= max_sessions.max(1) {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            debug!(session_id = %oldest, "Evicting least recently used chat session");
            self.entries.remove(&oldest);
        }

        let turns = SessionTurns::default();
        self.entries.insert(
            session_id.to_string(),
            SessionEntry {
                turns: turns.clone(),
                last_used: now,
            },
        );
        turns
    }
}

/// Shared chat state.
#[derive(Clone)]
pub struct ChatState {
    orchestrator: Arc<Orchestrator>,
    sessions: Arc<Mutex<SessionStore>>,
    history_limit: usize,
    max_sessions: usize,
}

impl ChatState {
    /// Create chat state around an orchestrator.
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        let history_limit = orchestrator.config().history_limit;
        Self {
            orchestrator,
            sessions: Arc::new(Mutex::new(SessionStore::default())),
            history_limit,
            max_sessions: 1000,
        }
    }

    /// Cap the number of sessions kept in memory
    #[must_use]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    async fn session(&self, session_id: &str) -> SessionTurns {
        self.sessions
            .lock()
            .await
            .checkout(session_id, self.max_sessions)
    }

    fn record(&self, turns: &mut Vec<ConversationTurn>, user: &str, assistant: String) {
        turns.push(ConversationTurn::new("user", user));
        turns.push(ConversationTurn::new("assistant", assistant));

        let excess = turns.len().saturating_sub(self.history_limit);
        turns.drain(..excess);
    }
}

/// Request to run a chat message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub user_id: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Chat answer with orchestration details for UI display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub metadata: ChatMetadata,
}

/// Orchestration details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMetadata {
    pub execution_id: Uuid,
    pub status: ExecutionStatus,
    pub intent: Intent,
    pub workflow: Workflow,
    pub quality_score: f64,
    pub re_research_performed: bool,
    pub re_research_iterations: u32,
    pub is_chained: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub total_execution_time_ms: u64,
}

impl From<&OrchestratorResponse> for ChatResponse {
    fn from(response: &OrchestratorResponse) -> Self {
        let answer = response
            .execution
            .steps
            .iter()
            .rev()
            .find(|s| s.output.is_some());

        let (model, kind) = match &response.body {
            ResponseBody::Single { metadata, .. } => (metadata.model_used.clone(), metadata.kind),
            ResponseBody::Chained { steps, .. } => {
                let kind = steps
                    .iter()
                    .rev()
                    .find(|s| s.purpose.is_generation() && s.output.is_some())
                    .map_or(ResponseKind::Text, |s| s.purpose.into());
                let model = answer.and_then(|s| s.model.clone()).unwrap_or_default();
                (model, kind)
            }
        };

        let citations = response
            .execution
            .steps
            .iter()
            .flat_map(|s| s.metadata.citations.iter().cloned())
            .collect();
        let image_url = response
            .execution
            .steps
            .iter()
            .find_map(|s| s.metadata.image_url.clone());
        let steps = match &response.body {
            ResponseBody::Chained { steps, .. } => steps.clone(),
            ResponseBody::Single { .. } => Vec::new(),
        };

        Self {
            response: response.final_content(),
            model,
            kind,
            metadata: ChatMetadata {
                execution_id: response.execution_id,
                status: response.status,
                intent: response.intent.clone(),
                workflow: response.workflow.clone(),
                quality_score: response.quality_score,
                re_research_performed: response.re_research_performed,
                re_research_iterations: response.re_research_iterations,
                is_chained: response.is_chained(),
                steps,
                citations,
                image_url,
                total_execution_time_ms: response.total_execution_time_ms,
            },
        }
    }
}

type ChatRejection = (StatusCode, Json<ApiResponse<ChatResponse>>);

/// Run a chat message through the orchestrator.
async fn chat(
    State(state): State<ChatState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, ChatRejection> {
    if request.message.trim().is_empty() || request.session_id.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("sessionId and message must not be empty")),
        ));
    }

    let session = state.session(&request.session_id).await;
    let mut turns = session.lock().await;

    let mut execute = ExecuteRequest::new(request.message.clone(), request.user_id.clone())
        .with_history(turns.clone());
    if let Some(model) = request.model.clone() {
        execute = execute.with_model(model);
    }

    let response = match state.orchestrator.execute(execute).await {
        Ok(response) => response,
        Err(e) => {
            error!(session_id = %request.session_id, error = %e, "Chat execution failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.user_message())),
            ));
        }
    };

    info!(
        session_id = %request.session_id,
        execution_id = %response.execution_id,
        status = ?response.status,
        "Chat message answered"
    );

    let answer = ChatResponse::from(&response);
    match response.status {
        ExecutionStatus::Failed | ExecutionStatus::Cancelled => {
            let message = response
                .error
                .clone()
                .unwrap_or_else(|| "The request could not be completed.".to_string());
            warn!(session_id = %request.session_id, error = %message, "Chat run did not complete");
            Ok(Json(ApiResponse::failure(answer, message)))
        }
        _ => {
            if !answer.response.trim().is_empty() {
                state.record(&mut turns, &request.message, answer.response.clone());
            }
            Ok(Json(ApiResponse::success(answer)))
        }
    }
}

/// Create chat routes
pub fn chat_routes(state: ChatState) -> Router {
    Router::new()
        .route("/api/v1/chat", post(chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use forefront_core::{
        DispatchRequest, DispatchResponse, ModelDispatch, OrchestratorConfig, StepType,
    };
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Answers every role with a schema-valid object
    #[derive(Default)]
    struct CannedDispatch {
        calls: Mutex<Vec<DispatchRequest>>,
    }

    #[async_trait::async_trait]
    impl ModelDispatch for CannedDispatch {
        async fn invoke(
            &self,
            request: DispatchRequest,
        ) -> forefront_core::Result<DispatchResponse> {
            self.calls.lock().unwrap().push(request.clone());
            let content = match request.step_type {
                StepType::Research => r#"{"summary":"Facts.","citations":[{"title":"Source"}]}"#,
                StepType::PromptOptimization => r#"{"optimizedPrompt":"Refined prompt"}"#,
                StepType::ImageGeneration => r#"{"imagePrompt":"A picture"}"#,
                StepType::CodeGeneration => r#"{"code":"print(1)","language":"python"}"#,
                StepType::TextGeneration => r#"{"content":"Plants turn light into sugar."}"#,
                StepType::FinalComposition => {
                    r#"{"response":"Plants turn light into sugar.","qualityScore":0.9}"#
                }
            };
            Ok(DispatchResponse {
                content: content.to_string(),
                model: "canned-model".to_string(),
            })
        }
    }

    fn app(dispatch: Arc<CannedDispatch>) -> Router {
        let orchestrator = Orchestrator::new(dispatch, OrchestratorConfig::new());
        chat_routes(ChatState::new(Arc::new(orchestrator)))
    }

    fn post_chat(body: serde_json::Value) -> Request<Body> {
        Request::post("/api/v1/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_answer_and_metadata() {
        let response = app(Arc::new(CannedDispatch::default()))
            .oneshot(post_chat(serde_json::json!({
                "sessionId": "s1",
                "message": "Explain how photosynthesis works",
                "userId": "u1"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["response"], "Plants turn light into sugar.");
        assert_eq!(json["data"]["model"], "canned-model");
        assert_eq!(json["data"]["type"], "text");
        assert_eq!(json["data"]["metadata"]["intent"]["domain"], "learning");
        assert_eq!(json["data"]["metadata"]["status"], "success");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let response = app(Arc::new(CannedDispatch::default()))
            .oneshot(post_chat(serde_json::json!({
                "sessionId": "s1",
                "message": "   ",
                "userId": "u1"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_history_reaches_later_requests() {
        let dispatch = Arc::new(CannedDispatch::default());
        let app = app(dispatch.clone());

        for message in ["Explain how photosynthesis works", "Explain it again"] {
            let response = app
                .clone()
                .oneshot(post_chat(serde_json::json!({
                    "sessionId": "s-history",
                    "message": message,
                    "userId": "u1"
                })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let calls = dispatch.calls.lock().unwrap();
        let last = calls.last().unwrap();
        assert_eq!(last.envelope.history.len(), 2);
        assert_eq!(
            last.envelope.history[0].content,
            "Explain how photosynthesis works"
        );
    }

    #[tokio::test]
    async fn test_same_session_requests_run_in_turn() {
        let dispatch = Arc::new(CannedDispatch::default());
        let orchestrator = Orchestrator::new(dispatch.clone(), OrchestratorConfig::new());
        let state = ChatState::new(Arc::new(orchestrator));
        let app = chat_routes(state.clone());

        let request = |message: &str| {
            post_chat(serde_json::json!({
                "sessionId": "s-shared",
                "message": message,
                "userId": "u1"
            }))
        };
        let (first, second) = tokio::join!(
            app.clone().oneshot(request("Explain how photosynthesis works")),
            app.clone().oneshot(request("Explain it again")),
        );
        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);

        let mut seen: Vec<usize> = dispatch
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.envelope.history.len())
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![0, 2]);

        let session = state.session("s-shared").await;
        assert_eq!(session.lock().await.len(), 4);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let orchestrator = Orchestrator::new(
            Arc::new(CannedDispatch::default()),
            OrchestratorConfig::new().with_history_limit(4),
        );
        let state = ChatState::new(Arc::new(orchestrator));

        let session = state.session("s").await;
        let mut turns = session.lock().await;
        for i in 0..5 {
            state.record(&mut turns, &format!("question {i}"), format!("answer {i}"));
        }

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].content, "question 3");
    }

    #[tokio::test]
    async fn test_least_recently_used_session_is_evicted() {
        let orchestrator = Orchestrator::new(
            Arc::new(CannedDispatch::default()),
            OrchestratorConfig::new(),
        );
        let state = ChatState::new(Arc::new(orchestrator)).with_max_sessions(2);

        state.session("a").await;
        state.session("b").await;
        state.session("a").await;
        state.session("c").await;

        let store = state.sessions.lock().await;
        assert_eq!(store.entries.len(), 2);
        assert!(store.entries.contains_key("a"));
        assert!(store.entries.contains_key("c"));
        assert!(!store.entries.contains_key("b"));
    }

    #[tokio::test]
    async fn test_session_count_stays_capped_over_http() {
        let orchestrator = Orchestrator::new(
            Arc::new(CannedDispatch::default()),
            OrchestratorConfig::new(),
        );
        let state = ChatState::new(Arc::new(orchestrator)).with_max_sessions(3);
        let app = chat_routes(state.clone());

        for i in 0..10 {
            let response = app
                .clone()
                .oneshot(post_chat(serde_json::json!({
                    "sessionId": format!("session-{i}"),
                    "message": "Explain how photosynthesis works",
                    "userId": "u1"
                })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let store = state.sessions.lock().await;
        assert_eq!(store.entries.len(), 3);
        assert!(store.entries.contains_key("session-9"));
    }

    #[tokio::test]
    async fn test_orchestrator_error_is_internal_server_error() {
        let orchestrator = Orchestrator::new(
            Arc::new(CannedDispatch::default()),
            OrchestratorConfig::new().with_quality_threshold(1.5),
        );
        let app = chat_routes(ChatState::new(Arc::new(orchestrator)));

        let response = app
            .oneshot(post_chat(serde_json::json!({
                "sessionId": "s1",
                "message": "Explain how photosynthesis works",
                "userId": "u1"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().is_some_and(|m| !m.is_empty()));
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_empty_answer_is_not_recorded() {
        #[derive(Default)]
        struct BlankDispatch;

        #[async_trait::async_trait]
        impl ModelDispatch for BlankDispatch {
            async fn invoke(
                &self,
                _request: DispatchRequest,
            ) -> forefront_core::Result<DispatchResponse> {
                Ok(DispatchResponse {
                    content: "   ".to_string(),
                    model: "blank-model".to_string(),
                })
            }
        }

        let orchestrator = Orchestrator::new(Arc::new(BlankDispatch), OrchestratorConfig::new());
        let state = ChatState::new(Arc::new(orchestrator));

        let response = chat_routes(state.clone())
            .oneshot(post_chat(serde_json::json!({
                "sessionId": "s-blank",
                "message": "Explain how photosynthesis works",
                "userId": "u1"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["metadata"]["status"], "failed");

        let session = state.session("s-blank").await;
        assert!(session.lock().await.is_empty());
    }
}
