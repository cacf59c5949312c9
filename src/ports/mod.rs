//! Ports - interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the orchestration logic and the outside world. Adapters implement them.
//!
//! - `DialogueEngine` - outbound calls to the dialogue engine
//! - `ActionRunner` - the single call to the action-execution webhook
//! - `ConversationStore` - local cache of engine-owned conversation state
//! - `ModelStore` - trained-model metadata records

mod action_runner;
mod conversation_store;
mod dialogue_engine;
mod model_store;

pub use action_runner::{ActionError, ActionRunner};
pub use conversation_store::{ConversationStore, StoreError};
pub use dialogue_engine::{ByteStream, DialogueEngine, EngineError, TrainingReply};
pub use model_store::ModelStore;
