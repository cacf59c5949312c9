//! ConversationGateway - conversation proxies with best-effort sync.
//!
//! Each operation forwards one call to the dialogue engine and, on
//! success, hands the raw body to [`ConversationSync`] before returning it
//! to the caller. The sync is fire-and-forget: a failed upsert never
//! changes the response. On engine failure nothing is synced.

use std::sync::Arc;

use crate::application::ConversationSync;
use crate::domain::ConversationField;
use crate::ports::{DialogueEngine, EngineError};

pub struct ConversationGateway {
    engine: Arc<dyn DialogueEngine>,
    sync: ConversationSync,
}

impl ConversationGateway {
    pub fn new(engine: Arc<dyn DialogueEngine>, sync: ConversationSync) -> Self {
        Self { engine, sync }
    }

    /// Forward a user message, caching the returned tracker state.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        payload: String,
    ) -> Result<String, EngineError> {
        let body = self.engine.send_message(conversation_id, payload).await?;
        self.sync
            .apply(conversation_id, ConversationField::Tracker, body.clone());
        Ok(body)
    }

    /// Trigger an intent directly, caching the returned tracker state.
    pub async fn trigger_intent(
        &self,
        conversation_id: &str,
        intent: &str,
    ) -> Result<String, EngineError> {
        let body = self.engine.trigger_intent(conversation_id, intent).await?;
        self.sync
            .apply(conversation_id, ConversationField::Tracker, body.clone());
        Ok(body)
    }

    /// Push a restart event onto the tracker, caching the result.
    pub async fn restart(&self, conversation_id: &str) -> Result<String, EngineError> {
        let body = self.engine.restart(conversation_id).await?;
        self.sync
            .apply(conversation_id, ConversationField::Tracker, body.clone());
        Ok(body)
    }

    /// Fetch the plain-text story export, caching it.
    pub async fn story(&self, conversation_id: &str) -> Result<String, EngineError> {
        let body = self.engine.story(conversation_id).await?;
        self.sync
            .apply(conversation_id, ConversationField::Story, body.clone());
        Ok(body)
    }
}
