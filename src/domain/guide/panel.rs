//! Per-panel conversation state and its transition function.
//!
//! A panel moves from its opening question through any number of summary
//! checkpoints to an optional terminal summary. The transitions are pure so
//! they can be exercised without a rendering surface.

use serde::Serialize;

use crate::domain::foundation::Purpose;

use super::reply::ServiceReply;

/// Where a panel is in its guided conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPhase {
    /// Opening question not loaded yet (or loading failed).
    Unloaded,
    /// A guiding question is shown and no summary has been accepted.
    Asking,
    /// A summary has been accepted and refinement options are offered.
    Refining,
    /// A terminal summary has been accepted; nothing further is asked.
    Finalized,
}

impl PanelPhase {
    /// True once a summary reply has been accepted.
    pub fn is_complete(&self) -> bool {
        matches!(self, PanelPhase::Refining | PanelPhase::Finalized)
    }

    /// Phase after receiving `reply`.
    ///
    /// Completion never regresses: a question or error arriving after a
    /// summary leaves the panel complete.
    pub fn on_reply(self, reply: &ServiceReply) -> PanelPhase {
        match reply {
            ServiceReply::Question { .. } => match self {
                PanelPhase::Unloaded | PanelPhase::Asking => PanelPhase::Asking,
                PanelPhase::Refining | PanelPhase::Finalized => PanelPhase::Refining,
            },
            ServiceReply::SummaryAndOptions { .. } => PanelPhase::Refining,
            ServiceReply::SummaryOnly { .. } => PanelPhase::Finalized,
            ServiceReply::Error { .. } => self,
        }
    }
}

/// Conversation state owned by exactly one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    purpose: Purpose,
    latest_summary: Option<String>,
    phase: PanelPhase,
}

impl ConversationState {
    pub fn new(purpose: Purpose) -> Self {
        Self {
            purpose,
            latest_summary: None,
            phase: PanelPhase::Unloaded,
        }
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn latest_summary(&self) -> Option<&str> {
        self.latest_summary.as_deref()
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    /// Applies a reply received for this panel's purpose.
    pub fn apply(&mut self, reply: &ServiceReply) {
        if reply.is_summary() {
            if let Some(summary) = reply.summary() {
                self.latest_summary = Some(summary.to_string());
            }
        }
        self.phase = self.phase.on_reply(reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> ServiceReply {
        ServiceReply::question("What is the primary goal?", vec!["Motivation".to_string()])
    }

    fn checkpoint(summary: &str) -> ServiceReply {
        ServiceReply::summary_and_options(summary, "Anything else?", vec!["No".to_string()])
    }

    #[test]
    fn new_state_is_unloaded_and_incomplete() {
        let state = ConversationState::new(Purpose::Pedagogy);
        assert_eq!(state.phase(), PanelPhase::Unloaded);
        assert!(!state.is_complete());
        assert_eq!(state.latest_summary(), None);
    }

    #[test]
    fn question_moves_to_asking_without_completing() {
        let mut state = ConversationState::new(Purpose::Objective);
        state.apply(&question());
        assert_eq!(state.phase(), PanelPhase::Asking);
        assert!(!state.is_complete());
    }

    #[test]
    fn checkpoint_sets_summary_and_completes() {
        let mut state = ConversationState::new(Purpose::Objective);
        state.apply(&question());
        state.apply(&checkpoint("Improve motivation"));
        assert_eq!(state.phase(), PanelPhase::Refining);
        assert_eq!(state.latest_summary(), Some("Improve motivation"));
        assert!(state.is_complete());
    }

    #[test]
    fn later_checkpoint_overwrites_summary() {
        let mut state = ConversationState::new(Purpose::Objective);
        state.apply(&checkpoint("first"));
        state.apply(&checkpoint("second"));
        assert_eq!(state.latest_summary(), Some("second"));
    }

    #[test]
    fn summary_only_finalizes() {
        let mut state = ConversationState::new(Purpose::Evaluation);
        state.apply(&ServiceReply::summary_only("Pre/post tests"));
        assert_eq!(state.phase(), PanelPhase::Finalized);
        assert_eq!(state.latest_summary(), Some("Pre/post tests"));
    }

    #[test]
    fn error_preserves_completed_summary() {
        let mut state = ConversationState::new(Purpose::Outcomes);
        state.apply(&checkpoint("ABCD outcome"));
        state.apply(&ServiceReply::error("upstream exploded"));
        assert!(state.is_complete());
        assert_eq!(state.latest_summary(), Some("ABCD outcome"));
    }

    #[test]
    fn error_on_fresh_panel_stays_incomplete() {
        let mut state = ConversationState::new(Purpose::Outcomes);
        state.apply(&ServiceReply::error("nope"));
        assert_eq!(state.phase(), PanelPhase::Unloaded);
        assert!(!state.is_complete());
    }

    #[test]
    fn question_after_summary_keeps_completion() {
        assert_eq!(PanelPhase::Refining.on_reply(&question()), PanelPhase::Refining);
        assert_eq!(PanelPhase::Finalized.on_reply(&question()), PanelPhase::Refining);
    }

    #[test]
    fn every_phase_reaches_refining_on_checkpoint() {
        for phase in [
            PanelPhase::Unloaded,
            PanelPhase::Asking,
            PanelPhase::Refining,
            PanelPhase::Finalized,
        ] {
            assert_eq!(phase.on_reply(&checkpoint("s")), PanelPhase::Refining);
        }
    }
}
