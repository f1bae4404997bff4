//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration for the native backend
///
/// Setting `api_version` switches the provider to Azure OpenAI addressing,
/// where `base_url` is the resource endpoint and `model` the deployment name.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key
    pub api_key: Option<String>,

    /// Base URL of the chat completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model (or Azure deployment) name
    #[serde(default = "default_model")]
    pub model: String,

    /// Azure API version
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient provider failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on the wait before a single retry, in seconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,

    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get retry backoff cap as Duration
    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }

    /// Longest a single completion can take, counting every retry and the
    /// longest wait before each one
    pub fn worst_case_secs(&self) -> u64 {
        let attempts = u64::from(self.max_retries) + 1;
        self.timeout_secs
            .saturating_mul(attempts)
            .saturating_add(self.max_backoff_secs.saturating_mul(u64::from(self.max_retries)))
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// True when addressing an Azure OpenAI deployment
    pub fn is_azure(&self) -> bool {
        self.api_version.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint(self.base_url.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            api_version: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            max_backoff_secs: default_max_backoff(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_max_backoff() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> AiConfig {
        AiConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.max_tokens, 1000);
        assert!((config.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
        assert!(!config.is_azure());
    }

    #[test]
    fn test_worst_case_counts_retries_and_backoff() {
        assert_eq!(AiConfig::default().worst_case_secs(), 30 * 3 + 10 * 2);

        let config = AiConfig {
            timeout_secs: 60,
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(config.worst_case_secs(), 60);

        let config = AiConfig {
            timeout_secs: u64::MAX,
            max_retries: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.worst_case_secs(), u64::MAX);
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
        assert!(keyed().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..keyed()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_validation_rejects_temperature_out_of_range() {
        let config = AiConfig {
            temperature: 3.5,
            ..keyed()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn test_azure_detection() {
        let config = AiConfig {
            api_version: Some("2024-06-01".to_string()),
            ..keyed()
        };
        assert!(config.is_azure());
    }
}
