//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CASE_INTAKE` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use case_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod features;
mod gateway;

pub use error::{ConfigError, ConfigValidationError};
pub use features::FeatureFlags;
pub use gateway::GatewayConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Submission gateway configuration (practice backend)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - Loads `.env` file if present (for development)
    /// - Reads environment variables with the `CASE_INTAKE` prefix
    /// - `CASE_INTAKE__GATEWAY__BASE_URL=...` -> `gateway.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CASE_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.gateway.validate()?;
        Ok(())
    }
}
