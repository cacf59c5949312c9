//! Model Store Port - trained-model metadata records.

use async_trait::async_trait;

use crate::domain::ModelRecord;

use super::StoreError;

/// Port for the `models` table.
///
/// Records are insert-only: one row per training attempt whose artifact
/// stream finished and whose engine response carried a server filename.
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn insert(&self, record: &ModelRecord) -> Result<(), StoreError>;
}
