//! HTTP Action Runner - reqwest implementation of the ActionRunner port.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::ActionRequest;
use crate::ports::{ActionError, ActionRunner};

/// Configuration for the action-service client.
#[derive(Debug, Clone)]
pub struct ActionClientConfig {
    /// Base URL of the action service, e.g. `http://localhost:5055`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ActionClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reqwest-backed implementation of [`ActionRunner`].
pub struct HttpActionRunner {
    config: ActionClientConfig,
    client: Client,
}

impl HttpActionRunner {
    pub fn new(config: ActionClientConfig) -> Result<Self, ActionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ActionError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn webhook_url(&self) -> String {
        format!("{}/webhook/", self.config.base_url)
    }
}

#[async_trait]
impl ActionRunner for HttpActionRunner {
    async fn run(&self, request: &ActionRequest) -> Result<String, ActionError> {
        let response = self
            .client
            .post(self.webhook_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ActionError::Transport(format!("connection failed: {}", e))
                } else {
                    ActionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ActionError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ActionError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
