//! Integration tests for conversation orchestration.
//!
//! These tests verify the end-to-end flow:
//! 1. Conversation operations proxy the engine and mirror the reply into
//!    the conversation store without blocking the caller
//! 2. Custom-action runs fetch a fresh domain before every webhook call
//! 3. Engine failures short-circuit both the sync and the action call
//!
//! Uses the mock engine, mock action runner and in-memory stores to test
//! the orchestration without external dependencies.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use dialogue_relay::adapters::action::MockActionRunner;
use dialogue_relay::adapters::engine::MockDialogueEngine;
use dialogue_relay::adapters::memory::InMemoryConversationStore;
use dialogue_relay::application::handlers::{
    ConversationGateway, RunActionCommand, RunActionError, RunActionHandler,
};
use dialogue_relay::application::ConversationSync;
use dialogue_relay::domain::Conversation;
use dialogue_relay::ports::ConversationStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn gateway_with(
    engine: MockDialogueEngine,
) -> (ConversationGateway, Arc<InMemoryConversationStore>) {
    let store = Arc::new(InMemoryConversationStore::new());
    let gateway = ConversationGateway::new(
        Arc::new(engine),
        ConversationSync::new(store.clone()),
    );
    (gateway, store)
}

async fn wait_for_row(
    store: &InMemoryConversationStore,
    conversation_id: &str,
) -> Option<Conversation> {
    for _ in 0..200 {
        if let Some(row) = store.find(conversation_id).await.unwrap() {
            return Some(row);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    None
}

// =============================================================================
// Conversation proxy + sync
// =============================================================================

#[tokio::test]
async fn message_flow_mirrors_tracker_into_the_store() {
    let engine = MockDialogueEngine::new()
        .with_body("send_message", r#"{"events":[{"event":"user"}]}"#);
    let (gateway, store) = gateway_with(engine);

    let body = gateway
        .send_message("c1", r#"{"text":"hi"}"#.to_string())
        .await
        .unwrap();

    assert_eq!(body, r#"{"events":[{"event":"user"}]}"#);
    let row = wait_for_row(&store, "c1").await.unwrap();
    assert_eq!(row.tracker.as_deref(), Some(r#"{"events":[{"event":"user"}]}"#));
    assert!(row.story.is_none());
}

#[tokio::test]
async fn story_and_tracker_land_in_separate_fields_of_one_row() {
    let engine = MockDialogueEngine::new()
        .with_body("trigger_intent", r#"{"slots":{}}"#)
        .with_body("story", "## c2\n* greet");
    let (gateway, store) = gateway_with(engine);

    gateway.trigger_intent("c2", "greet").await.unwrap();
    gateway.story("c2").await.unwrap();

    for _ in 0..200 {
        if let Some(row) = store.find("c2").await.unwrap() {
            if row.tracker.is_some() && row.story.is_some() {
                assert_eq!(row.tracker.as_deref(), Some(r#"{"slots":{}}"#));
                assert_eq!(row.story.as_deref(), Some("## c2\n* greet"));
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("conversation row never carried both fields");
}

#[tokio::test]
async fn repeated_syncs_overwrite_the_cached_tracker() {
    let engine = MockDialogueEngine::new().with_body("restart", r#"{"n":1}"#);
    let (gateway, store) = gateway_with(engine.clone());

    gateway.restart("c3").await.unwrap();
    wait_for_row(&store, "c3").await.unwrap();

    // Outcomes live behind shared state, so the reply can change mid-test.
    let _ = engine.with_body("restart", r#"{"n":2}"#);
    gateway.restart("c3").await.unwrap();

    for _ in 0..200 {
        let row = store.find("c3").await.unwrap().unwrap();
        if row.tracker.as_deref() == Some(r#"{"n":2}"#) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("second sync never overwrote the tracker");
}

#[tokio::test]
async fn engine_failure_leaves_the_store_untouched() {
    let engine = MockDialogueEngine::new().with_transport_error("send_message", "refused");
    let (gateway, store) = gateway_with(engine);

    let result = gateway.send_message("c4", "{}".to_string()).await;

    assert!(result.is_err());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.find("c4").await.unwrap().is_none());
}

// =============================================================================
// Custom-action runs
// =============================================================================

#[tokio::test]
async fn run_action_fetches_domain_then_calls_webhook() {
    let engine = Arc::new(
        MockDialogueEngine::new().with_body("domain", r#"{"actions":["action_greet"]}"#),
    );
    let actions = Arc::new(MockActionRunner::new().with_response(r#"[{"event":"bot"}]"#));
    let handler = RunActionHandler::new(engine.clone(), actions.clone());

    let body = handler
        .handle(RunActionCommand {
            conversation_id: "c5".to_string(),
            action: "action_greet".to_string(),
            tracker: json!({"sender_id": "c5"}),
        })
        .await
        .unwrap();

    assert_eq!(body, r#"[{"event":"bot"}]"#);
    assert_eq!(engine.calls(), vec!["domain"]);

    let requests = actions.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].next_action, "action_greet");
    assert_eq!(requests[0].sender_id, "c5");
    assert_eq!(requests[0].domain, json!({"actions": ["action_greet"]}));
}

#[tokio::test]
async fn domain_fetch_failure_skips_the_webhook() {
    let engine = Arc::new(MockDialogueEngine::new().with_status_error("domain", 500, "no model"));
    let actions = Arc::new(MockActionRunner::new());
    let handler = RunActionHandler::new(engine, actions.clone());

    let result = handler
        .handle(RunActionCommand {
            conversation_id: "c6".to_string(),
            action: "action_greet".to_string(),
            tracker: json!({}),
        })
        .await;

    assert!(matches!(result, Err(RunActionError::DomainFetch(_))));
    assert_eq!(actions.call_count(), 0);
}

#[tokio::test]
async fn every_run_refetches_the_domain() {
    let engine = Arc::new(MockDialogueEngine::new().with_body("domain", "{}"));
    let actions = Arc::new(MockActionRunner::new());
    let handler = RunActionHandler::new(engine.clone(), actions.clone());

    for _ in 0..3 {
        handler
            .handle(RunActionCommand {
                conversation_id: "c7".to_string(),
                action: "action_listen".to_string(),
                tracker: json!({}),
            })
            .await
            .unwrap();
    }

    assert_eq!(engine.calls(), vec!["domain", "domain", "domain"]);
    assert_eq!(actions.call_count(), 3);
}
