//! Summary context carried across panels within one relay session.
//!
//! Each completed panel summary is remembered so later requests are answered
//! with the earlier panels in view.

use std::collections::BTreeMap;

use crate::domain::foundation::Purpose;

use super::reply::ServiceReply;

/// Latest summary per panel purpose for one relay session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryContext {
    summaries: BTreeMap<Purpose, String>,
}

impl SummaryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers the summary a panel reply carries.
    ///
    /// Only summary replies to panel purposes count; questions, errors and
    /// the integrator's document leave the context untouched.
    pub fn record(&mut self, purpose: Purpose, reply: &ServiceReply) {
        if purpose.is_integrator() || !reply.is_summary() {
            return;
        }
        if let Some(summary) = reply.summary() {
            self.summaries.insert(purpose, summary.to_string());
        }
    }

    pub fn summary(&self, purpose: Purpose) -> Option<&str> {
        self.summaries.get(&purpose).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.values().all(|s| s.is_empty())
    }

    /// One `<purpose>: <summary>` line per non-empty summary, in purpose
    /// order, to be placed ahead of the persona in the system prompt.
    pub fn prompt_prefix(&self) -> String {
        self.summaries
            .iter()
            .filter(|(_, summary)| !summary.is_empty())
            .map(|(purpose, summary)| format!("{}: {}\n", purpose, summary))
            .collect()
    }

    /// Every panel keyed by purpose name, empty where nothing is recorded.
    pub fn full_state(&self) -> BTreeMap<String, String> {
        Purpose::panels()
            .iter()
            .map(|p| (p.as_str().to_string(), self.summary(*p).unwrap_or("").to_string()))
            .collect()
    }
}
