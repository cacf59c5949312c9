//! Dialogue engine adapters.

mod http_client;
mod mock;

pub use http_client::{EngineClientConfig, HttpDialogueEngine};
pub use mock::{MockDialogueEngine, MockTrainingReply};
