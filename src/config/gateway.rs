//! Submission gateway configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;

/// Configuration for the HTTP submission gateway adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the practice backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Timeout policy lives here, not in the
    /// wizard core.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token for the backend API.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl GatewayConfig {
    /// The request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates URL shape and timeout bounds.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigValidationError::InvalidGatewayUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ConfigValidationError::InvalidGatewayTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
