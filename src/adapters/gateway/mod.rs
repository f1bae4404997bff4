//! Conversation Gateway Adapters.
//!
//! - `HttpConversationGateway` - JSON over HTTP to the relay server
//! - `StubGateway` - Scripted replies for tests

mod http_gateway;
mod stub_gateway;

pub use http_gateway::HttpConversationGateway;
pub use stub_gateway::StubGateway;
