//! GuideSession - the six guided panels plus the integration step.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;

use crate::domain::foundation::Purpose;
use crate::domain::guide::{AggregateState, GuideProgress};
use crate::ports::ConversationGateway;

use super::integration::{IntegrationController, IntegrationError, SynthesisOutcome};
use super::panel::{PanelController, PanelError, PanelUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0} has no panel")]
    NotAPanel(Purpose),

    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Owns one controller per panel purpose, in purpose order, and the
/// integration controller. All share one gateway.
pub struct GuideSession<G: ?Sized + ConversationGateway> {
    panels: Vec<PanelController<G>>,
    integration: IntegrationController<G>,
}

impl<G: ?Sized + ConversationGateway> GuideSession<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let panels = Purpose::panels()
            .iter()
            .map(|purpose| PanelController::new(*purpose, Arc::clone(&gateway)))
            .collect();
        Self {
            panels,
            integration: IntegrationController::new(gateway),
        }
    }

    /// Loads every panel's opening question concurrently.
    pub async fn initialize_all(&mut self) -> Vec<(Purpose, PanelUpdate)> {
        let loads = self.panels.iter_mut().map(|panel| async move {
            let purpose = panel.purpose();
            let update = panel
                .initialize()
                .await
                .unwrap_or(PanelUpdate::TransportFailure);
            (purpose, update)
        });
        join_all(loads).await
    }

    pub fn panels(&self) -> &[PanelController<G>] {
        &self.panels
    }

    pub fn panel(&self, purpose: Purpose) -> Option<&PanelController<G>> {
        self.panels.iter().find(|p| p.purpose() == purpose)
    }

    pub fn panel_mut(&mut self, purpose: Purpose) -> Option<&mut PanelController<G>> {
        self.panels.iter_mut().find(|p| p.purpose() == purpose)
    }

    pub fn integration(&self) -> &IntegrationController<G> {
        &self.integration
    }

    pub async fn submit(&mut self, purpose: Purpose, user_input: &str) -> Result<PanelUpdate, SessionError> {
        let panel = self
            .panel_mut(purpose)
            .ok_or(SessionError::NotAPanel(purpose))?;
        Ok(panel.submit(user_input).await?)
    }

    pub async fn select_option(&mut self, purpose: Purpose, index: usize) -> Result<PanelUpdate, SessionError> {
        let panel = self
            .panel_mut(purpose)
            .ok_or(SessionError::NotAPanel(purpose))?;
        Ok(panel.select_option(index).await?)
    }

    pub fn progress(&self) -> GuideProgress {
        GuideProgress::from_states(self.panels.iter().map(|p| p.state()))
    }

    /// Snapshot of the current panel summaries.
    pub fn aggregate(&self) -> AggregateState {
        AggregateState::snapshot(self.panels.iter().map(|p| p.state()))
    }

    /// Synthesizes the proposal from a snapshot taken now.
    pub async fn synthesize(&mut self) -> Result<SynthesisOutcome, IntegrationError> {
        let snapshot = self.aggregate();
        self.integration.synthesize(&snapshot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::StubGateway;
    use crate::domain::guide::ServiceReply;

    fn echo_gateway() -> StubGateway {
        StubGateway::new().with_responder(|purpose, input| {
            if input.is_empty() {
                Ok(ServiceReply::question(
                    format!("Opening {}", purpose),
                    vec![format!("{} option", purpose)],
                ))
            } else {
                Ok(ServiceReply::summary_and_options(
                    format!("{} summary", purpose),
                    "More?",
                    vec![],
                ))
            }
        })
    }

    #[tokio::test]
    async fn initialize_all_loads_every_panel() {
        let gateway = echo_gateway();
        let mut session = GuideSession::new(Arc::new(gateway.clone()));

        let updates = session.initialize_all().await;

        assert_eq!(updates.len(), 6);
        assert!(updates.iter().all(|(_, u)| *u == PanelUpdate::Question));
        assert_eq!(gateway.call_count(), 6);
        for purpose in Purpose::panels() {
            let panel = session.panel(*purpose).unwrap();
            assert_eq!(
                panel.view().guiding_question,
                Some(format!("Opening {}", purpose))
            );
        }
        assert_eq!(session.progress().percent_complete().value(), 0);
    }

    #[tokio::test]
    async fn integrator_has_no_panel() {
        let mut session = GuideSession::new(Arc::new(echo_gateway()));
        assert!(session.panel(Purpose::Integrator).is_none());
        assert_eq!(
            session.submit(Purpose::Integrator, "x").await,
            Err(SessionError::NotAPanel(Purpose::Integrator))
        );
    }

    #[tokio::test]
    async fn progress_and_aggregate_follow_submissions() {
        let gateway = echo_gateway();
        let mut session = GuideSession::new(Arc::new(gateway.clone()));
        session.initialize_all().await;

        session.submit(Purpose::Objective, "goal").await.unwrap();
        session.select_option(Purpose::Outcomes, 0).await.unwrap();

        assert_eq!(session.progress().completed(), 2);
        assert_eq!(session.progress().percent_complete().value(), 33);
        assert_eq!(
            session.aggregate().summary(Purpose::Outcomes),
            Some("outcomes summary")
        );
        assert_eq!(gateway.calls_for(Purpose::Outcomes)[1], "outcomes option");
    }

    #[tokio::test]
    async fn synthesize_uses_current_snapshot() {
        let gateway = echo_gateway();
        let mut session = GuideSession::new(Arc::new(gateway.clone()));

        assert_eq!(
            session.synthesize().await,
            Err(IntegrationError::NoCompletedSteps)
        );

        session.submit(Purpose::Evaluation, "surveys").await.unwrap();
        let outcome = session.synthesize().await.unwrap();

        assert_eq!(outcome, SynthesisOutcome::Document);
        assert_eq!(
            gateway.calls_for(Purpose::Integrator),
            vec!["--- Evaluation ---\nevaluation summary"]
        );
    }
}
