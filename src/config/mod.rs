//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `TRIPDESK_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use tripdesk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod access;
mod ai;
mod error;
mod limits;
mod server;

pub use access::AccessConfig;
pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use limits::LimitsConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Tripdesk assistant.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Access-control configuration (allow-list)
    #[serde(default)]
    pub access: AccessConfig,

    /// Intake limits (turn quota, budget ceiling)
    #[serde(default)]
    pub limits: LimitsConfig,

    /// LLM collaborator configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `TRIPDESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TRIPDESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRIPDESK__ACCESS__ALLOWED_TRAVELERS=100,200` -> `access.allowed_travelers`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIPDESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// An empty allow-list is deliberately NOT a validation error: the gate
    /// fails closed and the process stays up, matching the denial behavior of
    /// an unauthorized caller rather than refusing to boot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.limits.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
