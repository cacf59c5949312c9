//! In-memory store adapters.
//!
//! Used by tests and local development where a PostgreSQL instance is not
//! worth the setup. Behaviorally equivalent to the postgres adapters:
//! upserts overwrite single fields, model inserts are append-only.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{Conversation, ConversationField, ModelRecord};
use crate::ports::{ConversationStore, ModelStore, StoreError};

/// In-memory implementation of [`ConversationStore`].
#[derive(Clone, Default)]
pub struct InMemoryConversationStore {
    rows: Arc<Mutex<HashMap<String, Conversation>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for error-path tests.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn upsert_field(
        &self,
        conversation_id: &str,
        field: ConversationField,
        payload: &str,
    ) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Database("injected write failure".to_string()));
        }

        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .entry(conversation_id.to_string())
            .or_insert_with(|| Conversation::new(conversation_id));
        match field {
            ConversationField::Tracker => row.tracker = Some(payload.to_string()),
            ConversationField::Story => row.story = Some(payload.to_string()),
        }
        Ok(())
    }

    async fn find(&self, conversation_id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.rows.lock().unwrap().get(conversation_id).cloned())
    }
}

/// In-memory implementation of [`ModelStore`].
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    rows: Arc<Mutex<Vec<ModelRecord>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// All records inserted so far.
    pub fn records(&self) -> Vec<ModelRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn insert(&self, record: &ModelRecord) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Database("injected write failure".to_string()));
        }
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}
