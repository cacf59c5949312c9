//! ConversationSync - best-effort persistence of engine conversation state.
//!
//! After every conversation-mutating engine call that succeeds, the raw
//! response body is copied into the local `conversations` row. The local
//! store is a read cache of engine-owned truth, not authoritative, so the
//! write runs as a detached task: it never delays the response already
//! produced for the triggering request, and a failed write is logged and
//! dropped.

use std::sync::Arc;

use crate::domain::ConversationField;
use crate::ports::ConversationStore;

/// Spawns overwrite-style upserts of conversation state.
#[derive(Clone)]
pub struct ConversationSync {
    store: Arc<dyn ConversationStore>,
}

impl ConversationSync {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Persist `payload` into the given field of the conversation row,
    /// creating the row if absent. Returns immediately; the write happens
    /// on a spawned task and its failure is only observable in the logs.
    pub fn apply(&self, conversation_id: &str, field: ConversationField, payload: String) {
        let store = self.store.clone();
        let conversation_id = conversation_id.to_string();

        tokio::spawn(async move {
            if let Err(e) = store
                .upsert_field(&conversation_id, field, &payload)
                .await
            {
                tracing::error!(
                    conversation_id = %conversation_id,
                    field = field.column(),
                    error = %e,
                    "conversation sync failed"
                );
            } else {
                tracing::debug!(
                    conversation_id = %conversation_id,
                    field = field.column(),
                    "conversation synced"
                );
            }
        });
    }
}
