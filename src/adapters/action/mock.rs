//! Mock Action Runner for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::ActionRequest;
use crate::ports::{ActionError, ActionRunner};

/// Mock action runner recording every request it receives.
#[derive(Clone)]
pub struct MockActionRunner {
    response: Arc<Mutex<Result<String, String>>>,
    requests: Arc<Mutex<Vec<ActionRequest>>>,
}

impl Default for MockActionRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockActionRunner {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok("[]".to_string()))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, body: impl Into<String>) -> Self {
        *self.response.lock().unwrap() = Ok(body.into());
        self
    }

    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        *self.response.lock().unwrap() = Err(message.into());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ActionRunner for MockActionRunner {
    async fn run(&self, request: &ActionRequest) -> Result<String, ActionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &*self.response.lock().unwrap() {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(ActionError::Transport(message.clone())),
        }
    }
}
