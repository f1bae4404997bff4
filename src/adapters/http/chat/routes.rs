//! Route definitions for the chat relay

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, relay_chat, ChatAppState};

/// Create the relay router
///
/// # Endpoints
///
/// - `POST /api/chat` - Relay a guide request
/// - `GET /health` - Liveness probe
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/api/chat", post(relay_chat))
        .route("/health", get(health))
}
