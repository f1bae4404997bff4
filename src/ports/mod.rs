//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationGateway` - client-side round trip to the conversation service
//! - `ReplyBackend` - server-side producer of replies behind the relay
//! - `AIProvider` - chat completion provider used by the native backend

mod ai_provider;
mod conversation_gateway;
mod reply_backend;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use conversation_gateway::{ConversationGateway, GatewayError};
pub use reply_backend::{BackendError, ReplyBackend};
