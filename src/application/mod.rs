//! Application layer - orchestration over the ports.

pub mod handlers;
mod sync;

pub use sync::ConversationSync;
