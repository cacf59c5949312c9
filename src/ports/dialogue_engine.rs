//! Dialogue Engine Port - outbound calls to the remote dialogue engine.
//!
//! The engine owns NLU parsing, per-conversation tracker state, and model
//! lifecycle. Every operation here performs exactly one outbound call and
//! hands back the raw response body; the relay never interprets engine
//! payloads beyond routing them.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Errors from a single engine call. No operation retries.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be reached at all.
    #[error("could not reach dialogue engine: {0}")]
    Transport(String),

    /// The engine answered with a non-success status.
    #[error("dialogue engine returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Streaming body of a training response.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, EngineError>> + Send>>;

/// Response to a training call, returned before the body has been read.
///
/// Unlike the other operations, `train` does not turn a non-success status
/// into an error: the training pipeline needs the status, the optional
/// server-assigned filename header, and the still-streaming body to decide
/// what to do with each.
pub struct TrainingReply {
    pub status: u16,
    /// Value of the engine's `filename` response header, when present.
    pub server_filename: Option<String>,
    pub body: ByteStream,
}

impl TrainingReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for the remote dialogue engine.
///
/// # Contract
///
/// Implementations must issue exactly one outbound call per operation,
/// fail fast on connection errors, and map non-success statuses to
/// [`EngineError::Status`] (except `train`, see [`TrainingReply`]). No
/// retries, no caching, no side effects beyond the network call.
#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// GET /status
    async fn status(&self) -> Result<String, EngineError>;

    /// GET /version
    async fn version(&self) -> Result<String, EngineError>;

    /// GET /domain - always-fresh domain description.
    ///
    /// Callers must not cache the result across action executions.
    async fn domain(&self) -> Result<String, EngineError>;

    /// PUT /model - load a model onto the engine.
    async fn load_model(&self, payload: String) -> Result<String, EngineError>;

    /// DELETE /model - unload the current model.
    async fn unload_model(&self) -> Result<String, EngineError>;

    /// POST /model/train - upload training data, stream back the artifact.
    async fn train(&self, payload: String) -> Result<TrainingReply, EngineError>;

    /// POST /model/parse - NLU-only parse, no conversation involved.
    async fn parse(&self, payload: String) -> Result<String, EngineError>;

    /// POST /conversations/{id}/messages
    async fn send_message(
        &self,
        conversation_id: &str,
        payload: String,
    ) -> Result<String, EngineError>;

    /// POST /conversations/{id}/trigger_intent with `{"name": intent}`
    async fn trigger_intent(
        &self,
        conversation_id: &str,
        intent: &str,
    ) -> Result<String, EngineError>;

    /// POST /conversations/{id}/tracker/events with `{"event":"restart"}`
    async fn restart(&self, conversation_id: &str) -> Result<String, EngineError>;

    /// GET /conversations/{id}/story - plain-text story export.
    async fn story(&self, conversation_id: &str) -> Result<String, EngineError>;
}
