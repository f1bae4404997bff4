//! AggregateState - read-only snapshot of panel summaries for synthesis.

use std::collections::BTreeMap;

use crate::domain::foundation::Purpose;

use super::panel::ConversationState;

/// Separator placed between labelled sections of the integration payload.
const SECTION_SEPARATOR: &str = "\n\n";

/// Latest summary of every guided panel, keyed in canonical purpose order.
///
/// Keys are fixed to the six panel purposes; a value is present only when
/// that panel is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateState {
    summaries: BTreeMap<Purpose, Option<String>>,
}

impl AggregateState {
    /// Snapshot with no completed panels.
    pub fn empty() -> Self {
        Self {
            summaries: Purpose::panels().iter().map(|p| (*p, None)).collect(),
        }
    }

    /// Captures the current summaries of `states`. States for the
    /// integrator, or for incomplete panels, contribute nothing.
    pub fn snapshot<'a>(states: impl IntoIterator<Item = &'a ConversationState>) -> Self {
        let mut aggregate = Self::empty();
        for state in states {
            if !state.is_complete() {
                continue;
            }
            if let Some(slot) = aggregate.summaries.get_mut(&state.purpose()) {
                *slot = state.latest_summary().map(str::to_string);
            }
        }
        aggregate
    }

    pub fn summary(&self, purpose: Purpose) -> Option<&str> {
        self.summaries.get(&purpose).and_then(|s| s.as_deref())
    }

    /// Complete panels and their summaries, in purpose order.
    pub fn completed(&self) -> impl Iterator<Item = (Purpose, &str)> {
        self.summaries
            .iter()
            .filter_map(|(purpose, summary)| summary.as_deref().map(|s| (*purpose, s)))
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    pub fn has_completed(&self) -> bool {
        self.completed().next().is_some()
    }

    /// The integrator's user input: one `--- label ---` section per complete
    /// panel. `None` when no panel is complete.
    pub fn combined_input(&self) -> Option<String> {
        if !self.has_completed() {
            return None;
        }
        let sections: Vec<String> = self
            .completed()
            .map(|(purpose, summary)| format!("--- {} ---\n{}", purpose.label(), summary))
            .collect();
        Some(sections.join(SECTION_SEPARATOR))
    }
}

impl Default for AggregateState {
    fn default() -> Self {
        Self::empty()
    }
}
