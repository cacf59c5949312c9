//! Route definitions for the relay's inbound surface.

use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{
    conversation_message, conversation_story, engine_endpoint, engine_status, engine_version,
    load_model, parse_message, restart_conversation, run_action, train_model, trigger_intent,
    unload_model, AppState,
};

/// Create the relay router with all endpoints.
///
/// # Endpoints
///
/// - `GET /engine/status` | `GET /engine/version` | `GET /engine/endpoint`
/// - `POST /model/train` | `PUT /model` | `DELETE /model` | `POST /model/parse`
/// - `POST /conversations/:id/messages` - forward a user message
/// - `POST /conversations/:id/trigger_intent` - trigger an intent
/// - `POST /conversations/:id/restart` - restart the tracker
/// - `GET /conversations/:id/story` - plain-text story export
/// - `POST /conversations/:id/action` - run a custom action
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/engine/status", get(engine_status))
        .route("/engine/version", get(engine_version))
        .route("/engine/endpoint", get(engine_endpoint))
        .route("/model/train", post(train_model))
        .route("/model", put(load_model))
        .route("/model", delete(unload_model))
        .route("/model/parse", post(parse_message))
        .route("/conversations/:id/messages", post(conversation_message))
        .route("/conversations/:id/trigger_intent", post(trigger_intent))
        .route("/conversations/:id/restart", post(restart_conversation))
        .route("/conversations/:id/story", get(conversation_story))
        .route("/conversations/:id/action", post(run_action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_creates_valid_router() {
        // Ensures the route configuration compiles and creates a valid router
        let _routes = routes();
    }
}
