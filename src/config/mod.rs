//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `PROPOSAL_BUILDER` prefix; nested values are separated by `__`.
//! Every section has defaults, so an empty environment yields a usable
//! configuration for the process-backed relay.
//!
//! # Example
//!
//! ```no_run
//! use proposal_builder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod client;
mod error;
mod relay;
mod server;

pub use ai::AiConfig;
pub use client::ClientConfig;
pub use error::{ConfigError, ValidationError};
pub use relay::{BackendKind, RelayConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Which generation backend the relay uses
    #[serde(default)]
    pub relay: RelayConfig,

    /// AI provider for the native backend
    #[serde(default)]
    pub ai: AiConfig,

    /// Guide client gateway settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `PROPOSAL_BUILDER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PROPOSAL_BUILDER__RELAY__BACKEND=native` -> `relay.backend = native`
    ///
    /// A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROPOSAL_BUILDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the relay server depends on
    ///
    /// The AI section is only checked when the native backend is selected.
    ///
    /// The selected backend's worst case must also fit inside the server's
    /// request timeout, or the router would cut replies off first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.relay.validate()?;
        if self.relay.backend == BackendKind::Native {
            self.ai.validate()?;
        }

        let backend_secs = self.backend_worst_case_secs();
        if backend_secs > self.server.request_timeout_secs {
            return Err(ValidationError::BackendExceedsRequestTimeout {
                backend_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
        Ok(())
    }

    /// Longest the selected backend can take to answer one request
    pub fn backend_worst_case_secs(&self) -> u64 {
        match self.relay.backend {
            BackendKind::Process => self.relay.timeout_secs,
            BackendKind::Native => self.ai.worst_case_secs(),
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
