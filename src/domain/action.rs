//! Action-execution request payload.

use serde::Serialize;
use serde_json::Value;

/// Body posted to the action service webhook.
///
/// Built per invocation and never persisted. The `domain` must come from a
/// fetch performed for this very request; reusing a domain fetched earlier
/// is disallowed because retraining can change available actions and slots.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub next_action: String,
    pub sender_id: String,
    pub tracker: Value,
    pub domain: Value,
}
