//! HTTP Dialogue Engine - reqwest implementation of the DialogueEngine port.
//!
//! Every operation is a single request against the engine's REST API with
//! the base URL injected at construction. Non-success statuses become
//! `EngineError::Status` carrying the echoed body; connection failures
//! become `EngineError::Transport`. The relay never retries.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Method, Response};
use serde_json::json;
use std::time::Duration;

use crate::ports::{DialogueEngine, EngineError, TrainingReply};

/// Configuration for the engine client.
#[derive(Debug, Clone)]
pub struct EngineClientConfig {
    /// Base URL of the dialogue engine, e.g. `http://localhost:5005`.
    pub base_url: String,
    /// Transport timeout. Not applied to `train`, whose body may stream
    /// for as long as the engine needs to produce the artifact.
    pub timeout: Duration,
}

impl EngineClientConfig {
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

/// Reqwest-backed implementation of [`DialogueEngine`].
pub struct HttpDialogueEngine {
    config: EngineClientConfig,
    client: Client,
    /// Separate client without a total-request timeout for training streams.
    train_client: Client,
}

impl HttpDialogueEngine {
    pub fn new(config: EngineClientConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::Transport(format!("failed to build HTTP client: {}", e)))?;
        let train_client = Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            train_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Issue one request and return the raw body, mapping transport and
    /// status failures to the port's error kinds.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<String, EngineError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(map_transport)?;
        Self::read_success_body(response).await
    }

    async fn read_success_body(response: Response) -> Result<String, EngineError> {
        let status = response.status();
        let body = response.text().await.map_err(map_transport)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(EngineError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn map_transport(e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::Transport(format!("request timed out: {}", e))
    } else if e.is_connect() {
        EngineError::Transport(format!("connection failed: {}", e))
    } else {
        EngineError::Transport(e.to_string())
    }
}

#[async_trait]
impl DialogueEngine for HttpDialogueEngine {
    async fn status(&self) -> Result<String, EngineError> {
        self.call(Method::GET, "/status", None).await
    }

    async fn version(&self) -> Result<String, EngineError> {
        self.call(Method::GET, "/version", None).await
    }

    async fn domain(&self) -> Result<String, EngineError> {
        self.call(Method::GET, "/domain", None).await
    }

    async fn load_model(&self, payload: String) -> Result<String, EngineError> {
        self.call(Method::PUT, "/model", Some(payload)).await
    }

    async fn unload_model(&self) -> Result<String, EngineError> {
        self.call(Method::DELETE, "/model", None).await
    }

    async fn train(&self, payload: String) -> Result<TrainingReply, EngineError> {
        let response = self
            .train_client
            .post(self.url("/model/train"))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status().as_u16();
        let server_filename = response
            .headers()
            .get("filename")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_transport))
            .boxed();

        Ok(TrainingReply {
            status,
            server_filename,
            body,
        })
    }

    async fn parse(&self, payload: String) -> Result<String, EngineError> {
        self.call(Method::POST, "/model/parse", Some(payload)).await
    }

    async fn send_message(
        &self,
        conversation_id: &str,
        payload: String,
    ) -> Result<String, EngineError> {
        let path = format!("/conversations/{}/messages", conversation_id);
        self.call(Method::POST, &path, Some(payload)).await
    }

    async fn trigger_intent(
        &self,
        conversation_id: &str,
        intent: &str,
    ) -> Result<String, EngineError> {
        let path = format!("/conversations/{}/trigger_intent", conversation_id);
        let body = json!({ "name": intent }).to_string();
        self.call(Method::POST, &path, Some(body)).await
    }

    async fn restart(&self, conversation_id: &str) -> Result<String, EngineError> {
        let path = format!("/conversations/{}/tracker/events", conversation_id);
        let body = json!({ "event": "restart" }).to_string();
        self.call(Method::POST, &path, Some(body)).await
    }

    async fn story(&self, conversation_id: &str) -> Result<String, EngineError> {
        let path = format!("/conversations/{}/story", conversation_id);
        self.call(Method::GET, &path, None).await
    }
}
