//! GuideProgress value object - completion across the guided panels.

use serde::Serialize;

use crate::domain::foundation::{Percentage, Purpose};

use super::panel::ConversationState;

/// A snapshot of how many panels have produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideProgress {
    completed: usize,
    total: usize,
}

impl GuideProgress {
    /// Counts complete panels among `states`. The integrator never counts,
    /// and the total is always the number of guided panels.
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a ConversationState>) -> Self {
        let completed = states
            .into_iter()
            .filter(|s| !s.purpose().is_integrator() && s.is_complete())
            .count();
        let total = Purpose::panels().len();
        Self {
            completed: completed.min(total),
            total,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Rounded completion percentage.
    pub fn percent_complete(&self) -> Percentage {
        Percentage::of(self.completed, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}
