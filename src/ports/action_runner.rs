//! Action Runner Port - the single call to the action-execution service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ActionRequest;

/// Errors from the action-service webhook call. Single attempt, fail fast.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("could not reach action service: {0}")]
    Transport(String),

    #[error("action service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Port for the remote action-execution service.
///
/// The only operation is posting a fully built [`ActionRequest`] to the
/// service's webhook and returning the raw response body.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// POST {action_endpoint}/webhook/
    async fn run(&self, request: &ActionRequest) -> Result<String, ActionError>;
}
