//! PostgreSQL implementation of ModelStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::ModelRecord;
use crate::ports::{ModelStore, StoreError};

/// PostgreSQL-backed trained-model metadata store.
#[derive(Clone)]
pub struct PostgresModelStore {
    pool: PgPool,
}

impl PostgresModelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModelStore for PostgresModelStore {
    async fn insert(&self, record: &ModelRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO models (
                model_name, comment, bot_id, local_path, server_path, server_response
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.model_name)
        .bind(&record.comment)
        .bind(&record.bot_id)
        .bind(&record.local_path)
        .bind(&record.server_path)
        .bind(&record.server_response)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            StoreError::Database(format!(
                "failed to insert model {}: {}",
                record.model_name, e
            ))
        })?;

        Ok(())
    }
}
