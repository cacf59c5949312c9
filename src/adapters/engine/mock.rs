//! Mock Dialogue Engine for testing.
//!
//! Configurable implementation of the DialogueEngine port so orchestration
//! logic can be exercised without a running engine. Records every call for
//! ordering assertions.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use std::sync::{Arc, Mutex};

use crate::ports::{DialogueEngine, EngineError, TrainingReply};

/// Outcome configured for one mock operation.
#[derive(Debug, Clone)]
enum MockOutcome {
    Body(String),
    Transport(String),
    Status { status: u16, body: String },
}

impl MockOutcome {
    fn resolve(&self) -> Result<String, EngineError> {
        match self {
            MockOutcome::Body(body) => Ok(body.clone()),
            MockOutcome::Transport(msg) => Err(EngineError::Transport(msg.clone())),
            MockOutcome::Status { status, body } => Err(EngineError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Training reply configured on the mock.
#[derive(Debug, Clone)]
pub struct MockTrainingReply {
    pub status: u16,
    pub server_filename: Option<String>,
    pub chunks: Vec<Vec<u8>>,
}

/// Mock dialogue engine.
///
/// Every operation defaults to a successful empty-object body; individual
/// operations can be overridden with bodies or failures via the builder
/// methods. Calls are recorded as `"<operation> <detail>"` strings.
#[derive(Clone)]
pub struct MockDialogueEngine {
    outcomes: Arc<Mutex<std::collections::HashMap<&'static str, MockOutcome>>>,
    training: Arc<Mutex<Option<MockTrainingReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockDialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDialogueEngine {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(std::collections::HashMap::new())),
            training: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_body(self, operation: &'static str, body: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(operation, MockOutcome::Body(body.into()));
        self
    }

    pub fn with_transport_error(self, operation: &'static str, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(operation, MockOutcome::Transport(message.into()));
        self
    }

    pub fn with_status_error(
        self,
        operation: &'static str,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.outcomes.lock().unwrap().insert(
            operation,
            MockOutcome::Status {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn with_training_reply(self, reply: MockTrainingReply) -> Self {
        *self.training.lock().unwrap() = Some(reply);
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn respond(&self, operation: &'static str) -> Result<String, EngineError> {
        match self.outcomes.lock().unwrap().get(operation) {
            Some(outcome) => outcome.resolve(),
            None => Ok("{}".to_string()),
        }
    }
}

#[async_trait]
impl DialogueEngine for MockDialogueEngine {
    async fn status(&self) -> Result<String, EngineError> {
        self.record("status");
        self.respond("status")
    }

    async fn version(&self) -> Result<String, EngineError> {
        self.record("version");
        self.respond("version")
    }

    async fn domain(&self) -> Result<String, EngineError> {
        self.record("domain");
        self.respond("domain")
    }

    async fn load_model(&self, _payload: String) -> Result<String, EngineError> {
        self.record("load_model");
        self.respond("load_model")
    }

    async fn unload_model(&self) -> Result<String, EngineError> {
        self.record("unload_model");
        self.respond("unload_model")
    }

    async fn train(&self, _payload: String) -> Result<TrainingReply, EngineError> {
        self.record("train");
        let reply = self
            .training
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(MockTrainingReply {
                status: 200,
                server_filename: Some("model.tar.gz".to_string()),
                chunks: vec![b"artifact".to_vec()],
            });

        let chunks: Vec<Result<Bytes, EngineError>> = reply
            .chunks
            .into_iter()
            .map(|c| Ok(Bytes::from(c)))
            .collect();

        Ok(TrainingReply {
            status: reply.status,
            server_filename: reply.server_filename,
            body: stream::iter(chunks).boxed(),
        })
    }

    async fn parse(&self, _payload: String) -> Result<String, EngineError> {
        self.record("parse");
        self.respond("parse")
    }

    async fn send_message(
        &self,
        conversation_id: &str,
        _payload: String,
    ) -> Result<String, EngineError> {
        self.record(format!("send_message {}", conversation_id));
        self.respond("send_message")
    }

    async fn trigger_intent(
        &self,
        conversation_id: &str,
        intent: &str,
    ) -> Result<String, EngineError> {
        self.record(format!("trigger_intent {} {}", conversation_id, intent));
        self.respond("trigger_intent")
    }

    async fn restart(&self, conversation_id: &str) -> Result<String, EngineError> {
        self.record(format!("restart {}", conversation_id));
        self.respond("restart")
    }

    async fn story(&self, conversation_id: &str) -> Result<String, EngineError> {
        self.record(format!("story {}", conversation_id));
        self.respond("story")
    }
}
