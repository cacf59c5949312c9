//! PostgreSQL implementation of ConversationStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::{Conversation, ConversationField};
use crate::ports::{ConversationStore, StoreError};

/// PostgreSQL-backed conversation cache.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn upsert_field(
        &self,
        conversation_id: &str,
        field: ConversationField,
        payload: &str,
    ) -> Result<(), StoreError> {
        // Column name comes from a closed enum, not caller input; the
        // payload itself is always bound as a parameter.
        let query = match field {
            ConversationField::Tracker => {
                r#"
                INSERT INTO conversations (conversation_id, tracker)
                VALUES ($1, $2)
                ON CONFLICT (conversation_id)
                DO UPDATE SET tracker = EXCLUDED.tracker
                "#
            }
            ConversationField::Story => {
                r#"
                INSERT INTO conversations (conversation_id, story)
                VALUES ($1, $2)
                ON CONFLICT (conversation_id)
                DO UPDATE SET story = EXCLUDED.story
                "#
            }
        };

        sqlx::query(query)
            .bind(conversation_id)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                StoreError::Database(format!(
                    "failed to upsert {} for conversation {}: {}",
                    field.column(),
                    conversation_id,
                    e
                ))
            })?;

        Ok(())
    }

    async fn find(&self, conversation_id: &str) -> Result<Option<Conversation>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT conversation_id, tracker, story
            FROM conversations
            WHERE conversation_id = $1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            StoreError::Database(format!(
                "failed to fetch conversation {}: {}",
                conversation_id, e
            ))
        })?;

        Ok(row.map(|row| Conversation {
            conversation_id: row.get("conversation_id"),
            tracker: row.get("tracker"),
            story: row.get("story"),
        }))
    }
}
