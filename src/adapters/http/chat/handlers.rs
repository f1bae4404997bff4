//! HTTP handlers for the chat relay endpoint

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::domain::guide::ServiceReply;
use crate::ports::{BackendError, ReplyBackend};

use super::dto::{ChatRequestDto, ChatResponseDto, INVALID_INPUT_MESSAGE};
use super::sessions::RelaySessions;

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// Shared state for the relay: the backend every request is delegated to
/// and the sessions carrying completed summaries between requests.
#[derive(Clone)]
pub struct ChatAppState {
    pub backend: Arc<dyn ReplyBackend>,
    pub sessions: Arc<RelaySessions>,
}

impl ChatAppState {
    pub fn new(backend: Arc<dyn ReplyBackend>) -> Self {
        Self {
            backend,
            sessions: Arc::new(RelaySessions::new(DEFAULT_SESSION_TTL)),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = Arc::new(RelaySessions::new(ttl));
        self
    }
}

/// Relay one guide request to the backend
///
/// POST /api/chat
pub async fn relay_chat(
    State(app_state): State<ChatAppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequestDto>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(dto)) => dto.validate(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable chat request");
            Err(ServiceReply::error(INVALID_INPUT_MESSAGE))
        }
    };
    let request = match request {
        Ok(request) => request,
        Err(reply) => {
            return (StatusCode::BAD_REQUEST, Json(ChatResponseDto::bare(reply))).into_response()
        }
    };

    let session = app_state.sessions.resolve(&headers);
    let backend = app_state.backend.name();
    let (status, body) = match app_state
        .backend
        .generate_in_context(request.purpose, &request.user_input, &session.context)
        .await
    {
        Ok(reply) => {
            tracing::debug!(purpose = %request.purpose, backend, kind = reply.kind(), "reply generated");
            let context = app_state
                .sessions
                .record(&session.id, request.purpose, &reply);
            (StatusCode::OK, ChatResponseDto::in_session(reply, &context))
        }
        Err(BackendError::Diagnostic(text)) => {
            tracing::warn!(purpose = %request.purpose, backend, diagnostic = %text, "backend reported an error");
            (
                StatusCode::OK,
                ChatResponseDto::in_session(ServiceReply::error(text), &session.context),
            )
        }
        Err(err) => {
            tracing::warn!(purpose = %request.purpose, backend, error = %err, "relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatResponseDto::bare(ServiceReply::error(err.to_string())),
            )
        }
    };

    let mut response = (status, Json(body)).into_response();
    if let Some(cookie) = session.set_cookie() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

/// Liveness probe
///
/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
