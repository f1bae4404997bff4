//! Client (gateway) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the guide client sends requests, and how long it waits
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the chat endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bound on one round trip, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/api/chat".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_relay() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/api/chat");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = ClientConfig {
            endpoint: "localhost:8080".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn rejects_unbounded_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
