//! In-memory relay sessions keyed by cookie.
//!
//! A session holds the summaries its client has completed so far. Sessions
//! idle for longer than the TTL are dropped the next time any session is
//! touched. Nothing is persisted across restarts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use uuid::Uuid;

use crate::domain::foundation::Purpose;
use crate::domain::guide::{ServiceReply, SummaryContext};

/// Name of the cookie carrying the relay session id.
pub const SESSION_COOKIE: &str = "proposal_session";

struct SessionEntry {
    context: SummaryContext,
    last_seen: Instant,
}

/// Session looked up (or opened) for one request.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: String,
    pub context: SummaryContext,
    /// True when the request carried no usable cookie and a new session
    /// was opened for it.
    pub created: bool,
}

impl SessionHandle {
    /// `Set-Cookie` value announcing a newly opened session.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.created {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        ))
        .ok()
    }
}

pub struct RelaySessions {
    entries: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl RelaySessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Returns the session named by the request's cookie, opening a fresh
    /// one when the cookie is missing, unknown or expired.
    pub fn resolve(&self, headers: &HeaderMap) -> SessionHandle {
        let now = Instant::now();
        let mut entries = self.lock();
        entries.retain(|_, entry| now.duration_since(entry.last_seen) <= self.ttl);

        if let Some(id) = session_id_from(headers) {
            if let Some(entry) = entries.get_mut(&id) {
                entry.last_seen = now;
                return SessionHandle {
                    id,
                    context: entry.context.clone(),
                    created: false,
                };
            }
        }

        let id = Uuid::new_v4().simple().to_string();
        entries.insert(
            id.clone(),
            SessionEntry {
                context: SummaryContext::new(),
                last_seen: now,
            },
        );
        tracing::debug!(session = %id, open = entries.len(), "relay session opened");
        SessionHandle {
            id,
            context: SummaryContext::new(),
            created: true,
        }
    }

    /// Records a reply against the session and returns its updated context.
    ///
    /// Only the replying purpose is written, so concurrent requests for
    /// other panels of the same session are not lost.
    pub fn record(&self, id: &str, purpose: Purpose, reply: &ServiceReply) -> SummaryContext {
        let mut entries = self.lock();
        let entry = entries.entry(id.to_string()).or_insert_with(|| SessionEntry {
            context: SummaryContext::new(),
            last_seen: Instant::now(),
        });
        entry.context.record(purpose, reply);
        entry.last_seen = Instant::now();
        entry.context.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Extracts the session id from the request's `Cookie` headers.
fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
