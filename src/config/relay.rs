//! Relay backend configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Which backend answers relay requests
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Spawn an external generation process per request
    #[default]
    Process,
    /// Call the AI provider in-process
    Native,
}

/// Relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Interpreter or executable to spawn
    #[serde(default = "default_program")]
    pub program: String,

    /// Whitespace-separated arguments placed before the purpose argument
    #[serde(default = "default_args")]
    pub args: String,

    /// Working directory for the spawned process
    pub working_dir: Option<PathBuf>,

    /// Upper bound on one generation, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RelayConfig {
    pub fn args_list(&self) -> Vec<String> {
        self.args.split_whitespace().map(str::to_string).collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == BackendKind::Process && self.program.trim().is_empty() {
            return Err(ValidationError::EmptyRelayProgram);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            program: default_program(),
            args: default_args(),
            working_dir: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_program() -> String {
    "python3".to_string()
}

fn default_args() -> String {
    "py/main.py".to_string()
}

fn default_timeout() -> u64 {
    90
}
