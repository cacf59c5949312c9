//! RunActionHandler - execute a custom action with a freshly fetched domain.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::ActionRequest;
use crate::ports::{ActionError, ActionRunner, DialogueEngine, EngineError};

/// Command to run an action inside a conversation.
#[derive(Debug, Clone)]
pub struct RunActionCommand {
    pub conversation_id: String,
    pub action: String,
    /// Tracker state supplied by the caller, forwarded opaquely.
    pub tracker: Value,
}

/// Error type for action execution. Both failure points collapse into a
/// uniform error for the caller; no retry, no cleanup needed.
#[derive(Debug, Error)]
pub enum RunActionError {
    #[error("domain fetch failed: {0}")]
    DomainFetch(#[from] EngineError),

    #[error("action execution failed: {0}")]
    Action(#[from] ActionError),

    #[error("dialogue engine returned a malformed domain: {0}")]
    MalformedDomain(#[from] serde_json::Error),
}

/// Coordinates domain-fetch-then-execute for action requests.
///
/// The domain is mandatory, always-fresh context: retraining can change
/// the engine's available actions and slots, so a domain fetched for an
/// earlier request must never be reused. If the fetch fails, the action
/// service is never contacted.
pub struct RunActionHandler {
    engine: Arc<dyn DialogueEngine>,
    actions: Arc<dyn ActionRunner>,
}

impl RunActionHandler {
    pub fn new(engine: Arc<dyn DialogueEngine>, actions: Arc<dyn ActionRunner>) -> Self {
        Self { engine, actions }
    }

    /// Fetch the domain, then post exactly one webhook call. The action
    /// service's raw response body is returned verbatim; resulting tracker
    /// state is deliberately NOT synced back into the local store.
    pub async fn handle(&self, cmd: RunActionCommand) -> Result<String, RunActionError> {
        let domain_body = self.engine.domain().await?;
        let domain: Value = serde_json::from_str(&domain_body)?;

        let request = ActionRequest {
            next_action: cmd.action,
            sender_id: cmd.conversation_id,
            tracker: cmd.tracker,
            domain,
        };

        let result = self.actions.run(&request).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::action::MockActionRunner;
    use crate::adapters::engine::MockDialogueEngine;
    use serde_json::json;

    fn command() -> RunActionCommand {
        RunActionCommand {
            conversation_id: "c1".to_string(),
            action: "action_greet".to_string(),
            tracker: json!({"slots": {"name": "ada"}}),
        }
    }

    #[tokio::test]
    async fn fetches_domain_then_runs_action() {
        let engine = Arc::new(
            MockDialogueEngine::new().with_body("domain", r#"{"actions":["action_greet"]}"#),
        );
        let runner = Arc::new(MockActionRunner::new().with_response(r#"[{"event":"bot"}]"#));
        let handler = RunActionHandler::new(engine.clone(), runner.clone());

        let body = handler.handle(command()).await.unwrap();

        assert_eq!(body, r#"[{"event":"bot"}]"#);
        assert_eq!(engine.calls(), vec!["domain"]);
        let requests = runner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].next_action, "action_greet");
        assert_eq!(requests[0].sender_id, "c1");
        assert_eq!(requests[0].domain["actions"][0], "action_greet");
        assert_eq!(requests[0].tracker["slots"]["name"], "ada");
    }

    #[tokio::test]
    async fn failed_domain_fetch_skips_action_call() {
        let engine =
            Arc::new(MockDialogueEngine::new().with_transport_error("domain", "refused"));
        let runner = Arc::new(MockActionRunner::new());
        let handler = RunActionHandler::new(engine, runner.clone());

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(RunActionError::DomainFetch(_))));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn domain_status_error_skips_action_call() {
        let engine = Arc::new(MockDialogueEngine::new().with_status_error(
            "domain",
            503,
            "no model loaded",
        ));
        let runner = Arc::new(MockActionRunner::new());
        let handler = RunActionHandler::new(engine, runner.clone());

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(RunActionError::DomainFetch(_))));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn action_failure_is_surfaced() {
        let engine = Arc::new(MockDialogueEngine::new().with_body("domain", "{}"));
        let runner = Arc::new(MockActionRunner::new().with_transport_error("refused"));
        let handler = RunActionHandler::new(engine, runner.clone());

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(RunActionError::Action(_))));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn each_invocation_refetches_the_domain() {
        let engine = Arc::new(MockDialogueEngine::new().with_body("domain", "{}"));
        let runner = Arc::new(MockActionRunner::new());
        let handler = RunActionHandler::new(engine.clone(), runner);

        handler.handle(command()).await.unwrap();
        handler.handle(command()).await.unwrap();

        assert_eq!(engine.calls(), vec!["domain", "domain"]);
    }
}
