//! Conversation Store Port - local cache of engine-owned conversation state.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Conversation, ConversationField};

/// Errors from the persistent store. All writes are attempted exactly once.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store write failed: {0}")]
    Database(String),
}

/// Port for the `conversations` table.
///
/// # Contract
///
/// `upsert_field` overwrites (never merges) the named field of the row
/// keyed by `conversation_id`, creating the row if absent. Rows are never
/// deleted through this port.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn upsert_field(
        &self,
        conversation_id: &str,
        field: ConversationField,
        payload: &str,
    ) -> Result<(), StoreError>;

    /// Fetch a cached conversation, if one has been synced yet.
    async fn find(&self, conversation_id: &str) -> Result<Option<Conversation>, StoreError>;
}
