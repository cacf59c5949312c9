//! Remote endpoint configuration
//!
//! Both base URLs are resolved once at startup and injected into the
//! outbound clients at construction; nothing reads them from ambient
//! global state afterwards.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Dialogue-engine and action-service endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Dialogue engine base URL, e.g. `http://localhost:5005`
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// Action-execution service base URL, e.g. `http://localhost:5055`
    #[serde(default = "default_action_url")]
    pub action_url: String,

    /// Transport timeout for non-streaming calls, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate endpoint configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for url in [&self.url, &self.action_url] {
            let is_http = url.starts_with("http://") || url.starts_with("https://");
            if !is_http || url.ends_with('/') {
                return Err(ValidationError::InvalidEndpointUrl);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            action_url: default_action_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_engine_url() -> String {
    "http://localhost:5005".to_string()
}

fn default_action_url() -> String {
    "http://localhost:5055".to_string()
}

fn default_timeout() -> u64 {
    30
}
