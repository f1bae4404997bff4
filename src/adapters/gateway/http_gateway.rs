//! HTTP Conversation Gateway - POSTs guide requests to the relay server.
//!
//! Each gateway keeps its own cookie jar, so all of its requests share one
//! relay session and later panels are answered with earlier summaries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::domain::foundation::Purpose;
use crate::domain::guide::{GuideRequest, ServiceReply};
use crate::ports::{ConversationGateway, GatewayError};

/// Gateway over a single JSON endpoint with a bounded request timeout.
#[derive(Debug, Clone)]
pub struct HttpConversationGateway {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpConversationGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| GatewayError::network(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            GatewayError::network(format!("Connection failed: {}", e))
        } else {
            GatewayError::network(e.to_string())
        }
    }
}

#[async_trait]
impl ConversationGateway for HttpConversationGateway {
    async fn send(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, GatewayError> {
        let request = GuideRequest::new(purpose, user_input);
        tracing::debug!(%purpose, endpoint = %self.endpoint, "sending guide request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            tracing::warn!(%purpose, status = status.as_u16(), "guide request rejected");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ServiceReply =
            serde_json::from_str(&body).map_err(|e| GatewayError::malformed(e.to_string()))?;
        tracing::debug!(%purpose, kind = reply.kind(), "guide reply received");
        Ok(reply)
    }
}
