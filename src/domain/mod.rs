//! Domain types shared across the orchestration layer.
//!
//! The relay treats everything owned by the dialogue engine (trackers,
//! stories, domains) as opaque payloads; these types only give names and
//! minimal structure to what flows between the remote services and the
//! local store.

mod action;
mod conversation;
mod model;

pub use action::ActionRequest;
pub use conversation::{Conversation, ConversationField};
pub use model::{artifact_file_name, ModelRecord};
