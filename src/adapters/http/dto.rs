//! HTTP DTOs for the relay's inbound surface.
//!
//! Engine and action-service bodies stay opaque strings end to end; these
//! types only cover the relay's own envelopes.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the training route.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainQuery {
    pub bot_name: String,
    pub comment: Option<String>,
    pub bot_id: Option<String>,
}

/// Body for triggering an intent directly.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerIntentRequest {
    pub name: String,
}

/// Body for running a custom action inside a conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct RunActionRequest {
    pub action: String,
    /// Tracker state forwarded opaquely to the action service.
    #[serde(default)]
    pub tracker: serde_json::Value,
}

/// Response for the configured-endpoint route.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResponse {
    pub url: String,
}

/// Acknowledgement for an accepted training request. The artifact may
/// still be streaming to disk when this is sent.
#[derive(Debug, Clone, Serialize)]
pub struct TrainResponse {
    pub model_name: String,
}

/// Uniform failure envelope echoing the remote error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_query_requires_only_bot_name() {
        let query: TrainQuery =
            serde_json::from_str(r#"{"bot_name":"demo"}"#).unwrap();
        assert_eq!(query.bot_name, "demo");
        assert!(query.comment.is_none());
        assert!(query.bot_id.is_none());
    }

    #[test]
    fn run_action_request_defaults_tracker_to_null() {
        let req: RunActionRequest = serde_json::from_str(r#"{"action":"action_greet"}"#).unwrap();
        assert_eq!(req.action, "action_greet");
        assert!(req.tracker.is_null());
    }

    #[test]
    fn error_response_serializes_error_key() {
        let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
