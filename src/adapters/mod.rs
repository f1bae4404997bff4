//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - AI provider implementations (OpenAI, mock)
//! - `gateway` - Conversation gateway implementations (HTTP, stub)
//! - `relay` - Reply backend that spawns a generation process
//! - `http` - Relay server routes

pub mod ai;
pub mod gateway;
pub mod http;
pub mod relay;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use gateway::{HttpConversationGateway, StubGateway};
pub use http::{app_router, ChatAppState};
pub use relay::ProcessRelay;
