//! Application handlers - orchestration flows behind the HTTP surface.

mod conversation;
mod run_action;
mod train_model;

pub use conversation::ConversationGateway;
pub use run_action::{RunActionCommand, RunActionError, RunActionHandler};
pub use train_model::{TrainModelAck, TrainModelCommand, TrainModelError, TrainModelHandler};
