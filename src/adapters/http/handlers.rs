//! HTTP handlers connecting axum routes to the application layer.
//!
//! Failure policy mirrors the design throughout: any remote-call error
//! surfaces as a 500 whose body echoes the failure payload, while sync and
//! persistence problems never reach the caller.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::{
    ConversationGateway, RunActionCommand, RunActionError, RunActionHandler, TrainModelCommand,
    TrainModelError, TrainModelHandler,
};
use crate::application::ConversationSync;
use crate::ports::{ActionError, ActionRunner, ConversationStore, DialogueEngine, EngineError, ModelStore};

use super::dto::{
    EndpointResponse, ErrorResponse, RunActionRequest, TrainQuery, TrainResponse,
    TriggerIntentRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn DialogueEngine>,
    pub actions: Arc<dyn ActionRunner>,
    pub conversations: Arc<dyn ConversationStore>,
    pub models: Arc<dyn ModelStore>,
    /// Configured dialogue-engine base URL, reported by `/engine/endpoint`.
    pub engine_url: String,
    /// Root of the training-artifact tree.
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn conversation_gateway(&self) -> ConversationGateway {
        ConversationGateway::new(
            self.engine.clone(),
            ConversationSync::new(self.conversations.clone()),
        )
    }

    pub fn run_action_handler(&self) -> RunActionHandler {
        RunActionHandler::new(self.engine.clone(), self.actions.clone())
    }

    pub fn train_model_handler(&self) -> TrainModelHandler {
        TrainModelHandler::new(self.engine.clone(), self.models.clone(), self.data_dir.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════════

fn engine_failure(e: EngineError) -> (StatusCode, Json<ErrorResponse>) {
    let payload = match e {
        EngineError::Transport(message) => message,
        EngineError::Status { body, .. } => body,
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(payload)),
    )
}

fn action_failure(e: RunActionError) -> (StatusCode, Json<ErrorResponse>) {
    let payload = match e {
        RunActionError::DomainFetch(EngineError::Status { body, .. }) => body,
        RunActionError::DomainFetch(EngineError::Transport(message)) => message,
        RunActionError::Action(ActionError::Status { body, .. }) => body,
        RunActionError::Action(ActionError::Transport(message)) => message,
        RunActionError::MalformedDomain(e) => e.to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(payload)),
    )
}

fn train_failure(e: TrainModelError) -> (StatusCode, Json<ErrorResponse>) {
    let payload = match e {
        TrainModelError::Filesystem(message) => message,
        TrainModelError::Engine(EngineError::Transport(message)) => message,
        TrainModelError::Engine(EngineError::Status { body, .. }) => body,
        TrainModelError::TrainingFailed { body, .. } => body,
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(payload)),
    )
}

/// Opaque engine body relayed with a JSON content type.
fn json_body(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Engine info
// ════════════════════════════════════════════════════════════════════════════════

/// GET /engine/status
pub async fn engine_status(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state.engine.status().await.map_err(engine_failure)?;
    Ok(json_body(body))
}

/// GET /engine/version
pub async fn engine_version(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state.engine.version().await.map_err(engine_failure)?;
    Ok(json_body(body))
}

/// GET /engine/endpoint
pub async fn engine_endpoint(State(state): State<AppState>) -> Json<EndpointResponse> {
    Json(EndpointResponse {
        url: state.engine_url.clone(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Model lifecycle
// ════════════════════════════════════════════════════════════════════════════════

/// POST /model/train
pub async fn train_model(
    State(state): State<AppState>,
    Query(query): Query<TrainQuery>,
    payload: String,
) -> Result<(StatusCode, Json<TrainResponse>), (StatusCode, Json<ErrorResponse>)> {
    let cmd = TrainModelCommand {
        bot_name: query.bot_name,
        comment: query.comment,
        bot_id: query.bot_id,
        payload,
    };

    let ack = state
        .train_model_handler()
        .handle(cmd)
        .await
        .map_err(train_failure)?;

    Ok((
        StatusCode::OK,
        Json(TrainResponse {
            model_name: ack.model_name,
        }),
    ))
}

/// PUT /model
pub async fn load_model(
    State(state): State<AppState>,
    payload: String,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state
        .engine
        .load_model(payload)
        .await
        .map_err(engine_failure)?;
    Ok(json_body(body))
}

/// DELETE /model
pub async fn unload_model(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state.engine.unload_model().await.map_err(engine_failure)?;
    Ok(json_body(body))
}

/// POST /model/parse - NLU-only parse, no conversation sync.
pub async fn parse_message(
    State(state): State<AppState>,
    payload: String,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state.engine.parse(payload).await.map_err(engine_failure)?;
    Ok(json_body(body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversations
// ════════════════════════════════════════════════════════════════════════════════

/// POST /conversations/:id/messages
pub async fn conversation_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    payload: String,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state
        .conversation_gateway()
        .send_message(&conversation_id, payload)
        .await
        .map_err(engine_failure)?;
    Ok(json_body(body))
}

/// POST /conversations/:id/trigger_intent
pub async fn trigger_intent(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(req): Json<TriggerIntentRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state
        .conversation_gateway()
        .trigger_intent(&conversation_id, &req.name)
        .await
        .map_err(engine_failure)?;
    Ok(json_body(body))
}

/// POST /conversations/:id/restart
pub async fn restart_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state
        .conversation_gateway()
        .restart(&conversation_id)
        .await
        .map_err(engine_failure)?;
    Ok(json_body(body))
}

/// GET /conversations/:id/story - plain-text response.
pub async fn conversation_story(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let body = state
        .conversation_gateway()
        .story(&conversation_id)
        .await
        .map_err(engine_failure)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

/// POST /conversations/:id/action
pub async fn run_action(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Json(req): Json<RunActionRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let cmd = RunActionCommand {
        conversation_id,
        action: req.action,
        tracker: req.tracker,
    };

    let body = state
        .run_action_handler()
        .handle(cmd)
        .await
        .map_err(action_failure)?;
    Ok(json_body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::action::MockActionRunner;
    use crate::adapters::engine::MockDialogueEngine;
    use crate::adapters::memory::{InMemoryConversationStore, InMemoryModelStore};
    use axum::body::to_bytes;
    use serde_json::json;
    use std::time::Duration;

    fn test_state(engine: MockDialogueEngine) -> AppState {
        AppState {
            engine: Arc::new(engine),
            actions: Arc::new(MockActionRunner::new()),
            conversations: Arc::new(InMemoryConversationStore::new()),
            models: Arc::new(InMemoryModelStore::new()),
            engine_url: "http://localhost:5005".to_string(),
            data_dir: std::env::temp_dir(),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn status_proxies_engine_body() {
        let state = test_state(MockDialogueEngine::new().with_body("status", r#"{"ok":true}"#));

        let response = engine_status(State(state)).await.unwrap();

        assert_eq!(body_text(response).await, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn endpoint_reports_configured_url() {
        let state = test_state(MockDialogueEngine::new());

        let Json(response) = engine_endpoint(State(state)).await;

        assert_eq!(response.url, "http://localhost:5005");
    }

    #[tokio::test]
    async fn engine_failure_maps_to_500_with_echoed_body() {
        let state =
            test_state(MockDialogueEngine::new().with_status_error("version", 503, "warming up"));

        let err = engine_version(State(state)).await.unwrap_err();

        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.1.error, "warming up");
    }

    #[tokio::test]
    async fn trigger_intent_round_trip_caches_tracker() {
        let engine = MockDialogueEngine::new()
            .with_body("trigger_intent", r#"{"tracker":{"slots":{}}}"#);
        let state = test_state(engine);
        let conversations = state.conversations.clone();

        let response = trigger_intent(
            State(state),
            Path("c1".to_string()),
            Json(TriggerIntentRequest {
                name: "greet".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body_text(response).await, r#"{"tracker":{"slots":{}}}"#);

        for _ in 0..200 {
            if let Some(row) = conversations.find("c1").await.unwrap() {
                assert_eq!(row.tracker.as_deref(), Some(r#"{"tracker":{"slots":{}}}"#));
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("tracker was never synced");
    }

    #[tokio::test]
    async fn story_responds_plain_text() {
        let state = test_state(MockDialogueEngine::new().with_body("story", "## story"));

        let response = conversation_story(State(state), Path("c1".to_string()))
            .await
            .unwrap();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_text(response).await, "## story");
    }

    #[tokio::test]
    async fn run_action_echoes_remote_failure() {
        let engine = MockDialogueEngine::new().with_status_error("domain", 500, "no model");
        let state = test_state(engine);

        let err = run_action(
            State(state),
            Path("c1".to_string()),
            Json(RunActionRequest {
                action: "action_greet".to_string(),
                tracker: json!({}),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.1.error, "no model");
    }
}
