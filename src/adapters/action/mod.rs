//! Action-execution service adapters.

mod http_client;
mod mock;

pub use http_client::{ActionClientConfig, HttpActionRunner};
pub use mock::MockActionRunner;
