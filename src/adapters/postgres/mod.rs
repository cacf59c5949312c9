//! PostgreSQL adapters for the persistent store.

mod conversation_store;
mod model_store;

pub use conversation_store::PostgresConversationStore;
pub use model_store::PostgresModelStore;
