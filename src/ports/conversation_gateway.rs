//! Conversation Gateway Port - the one collaborator every controller uses.
//!
//! A gateway forwards `(purpose, user_input)` to the conversation service and
//! returns its normalized reply. It is stateless: no retry, batching or
//! caching. All conversation state lives in the controllers.
//!
//! Backend failures arrive as `Ok(ServiceReply::Error { .. })` carrying the
//! raw failure text. `GatewayError` is reserved for transport failures where
//! no usable reply exists (connection refused, timeout, non-2xx status,
//! malformed body).

use async_trait::async_trait;

use crate::domain::foundation::Purpose;
use crate::domain::guide::ServiceReply;

/// Port for round trips to the conversation service.
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    /// Sends one request and awaits its reply.
    async fn send(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, GatewayError>;
}

/// Transport-level failures. None of these carries a usable reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Connection could not be made or was interrupted.
    #[error("network error: {0}")]
    Network(String),

    /// No reply within the configured bound.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a recognizable reply.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
