//! HTTP adapter for the chat relay
//!
//! Validates guide requests and hands them to the configured reply backend,
//! keeping each client's completed summaries in a cookie-keyed session.

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod sessions;

pub use dto::{ChatRequestDto, ChatResponseDto, INVALID_INPUT_MESSAGE};
pub use handlers::ChatAppState;
pub use routes::routes;
pub use sessions::{RelaySessions, SESSION_COOKIE};
