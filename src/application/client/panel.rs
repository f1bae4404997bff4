//! PanelController - drives one panel's guided conversation.
//!
//! The controller owns its `ConversationState` and view, and talks to the
//! service only through the gateway. At most one request is in flight per
//! panel; `begin_submit` and `finish` expose that guard to callers that
//! dispatch the round trip themselves.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::Purpose;
use crate::domain::guide::{ConversationState, ServiceReply};
use crate::ports::{ConversationGateway, GatewayError};

use super::view::{PanelOutput, PanelView, INITIAL_LOAD_FAILED, SUBMISSION_FAILED};

/// Rejections that happen before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("a request for {0} is already in flight")]
    AlreadyInFlight(Purpose),

    #[error("input is empty")]
    EmptyInput,

    #[error("option {index} does not exist ({available} available)")]
    OptionOutOfRange { index: usize, available: usize },
}

/// How a finished round trip changed the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelUpdate {
    /// A guiding question was shown.
    Question,
    /// A summary checkpoint was accepted.
    Summary,
    /// A terminal summary was accepted.
    Finalized,
    /// The service answered with an error reply.
    ReplyError,
    /// No reply arrived.
    TransportFailure,
}

pub struct PanelController<G: ?Sized + ConversationGateway> {
    gateway: Arc<G>,
    state: ConversationState,
    view: PanelView,
    in_flight: bool,
}

impl<G: ?Sized + ConversationGateway> PanelController<G> {
    pub fn new(purpose: Purpose, gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: ConversationState::new(purpose),
            view: PanelView::default(),
            in_flight: false,
        }
    }

    pub fn purpose(&self) -> Purpose {
        self.state.purpose()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn latest_summary(&self) -> Option<&str> {
        self.state.latest_summary()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Replaces the input text without submitting it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.view.input = text.into();
    }

    /// Loads the opening question. No retry on failure.
    pub async fn initialize(&mut self) -> Result<PanelUpdate, PanelError> {
        if self.in_flight {
            return Err(PanelError::AlreadyInFlight(self.purpose()));
        }
        self.in_flight = true;
        let outcome = self.gateway.send(self.purpose(), "").await;
        self.in_flight = false;

        Ok(match outcome {
            Ok(reply) => self.apply_reply(reply),
            Err(err) => {
                tracing::warn!(purpose = %self.purpose(), error = %err, "opening question failed");
                self.view.output = PanelOutput::Notice(INITIAL_LOAD_FAILED.to_string());
                PanelUpdate::TransportFailure
            }
        })
    }

    /// Claims the in-flight slot for `user_input` and returns the text to send.
    pub fn begin_submit(&mut self, user_input: &str) -> Result<String, PanelError> {
        if self.in_flight {
            return Err(PanelError::AlreadyInFlight(self.purpose()));
        }
        let text = user_input.trim();
        if text.is_empty() {
            return Err(PanelError::EmptyInput);
        }

        self.in_flight = true;
        self.view.input = text.to_string();
        self.view.submit_enabled = false;
        self.view.output = PanelOutput::Thinking;
        Ok(text.to_string())
    }

    /// Applies the outcome of the round trip started by `begin_submit`.
    pub fn finish(&mut self, outcome: Result<ServiceReply, GatewayError>) -> PanelUpdate {
        self.in_flight = false;
        self.view.submit_enabled = true;

        match outcome {
            Ok(reply) => self.apply_reply(reply),
            Err(err) => {
                tracing::warn!(purpose = %self.purpose(), error = %err, "submission failed");
                self.view.output = PanelOutput::Notice(SUBMISSION_FAILED.to_string());
                PanelUpdate::TransportFailure
            }
        }
    }

    /// Sends `user_input` and applies the reply.
    pub async fn submit(&mut self, user_input: &str) -> Result<PanelUpdate, PanelError> {
        let text = self.begin_submit(user_input)?;
        let outcome = self.gateway.send(self.purpose(), &text).await;
        Ok(self.finish(outcome))
    }

    /// Submits the text of option `index` exactly as if it had been typed.
    pub async fn select_option(&mut self, index: usize) -> Result<PanelUpdate, PanelError> {
        if self.in_flight {
            return Err(PanelError::AlreadyInFlight(self.purpose()));
        }
        let text = self
            .view
            .options
            .get(index)
            .cloned()
            .ok_or(PanelError::OptionOutOfRange {
                index,
                available: self.view.options.len(),
            })?;

        self.view.input = text.clone();
        self.submit(&text).await
    }

    fn apply_reply(&mut self, reply: ServiceReply) -> PanelUpdate {
        self.state.apply(&reply);
        tracing::debug!(
            purpose = %self.purpose(),
            kind = reply.kind(),
            phase = ?self.state.phase(),
            "panel reply applied"
        );

        match reply {
            ServiceReply::Question { question, options } => {
                self.view.guiding_question = Some(question);
                self.view.options = options;
                if self.view.output == PanelOutput::Thinking {
                    self.view.output = self
                        .state
                        .latest_summary()
                        .map(|s| PanelOutput::Summary(s.to_string()))
                        .unwrap_or(PanelOutput::Empty);
                }
                PanelUpdate::Question
            }
            ServiceReply::SummaryAndOptions {
                summary,
                follow_up_question,
                suggested_options,
                explanation,
            } => {
                self.view.guiding_question = Some(follow_up_question);
                self.view.output = PanelOutput::Summary(summary);
                self.view.options = suggested_options;
                self.view.explanation = explanation;
                self.view.input.clear();
                PanelUpdate::Summary
            }
            ServiceReply::SummaryOnly { summary } => {
                self.view.output = PanelOutput::Summary(summary);
                self.view.options.clear();
                self.view.explanation = None;
                self.view.input.clear();
                PanelUpdate::Finalized
            }
            ServiceReply::Error { summary } => {
                self.view.output = PanelOutput::ReplyError(summary);
                PanelUpdate::ReplyError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::StubGateway;
    use crate::domain::guide::PanelPhase;

    fn opening() -> ServiceReply {
        ServiceReply::question(
            "What is the primary goal of your project?",
            vec!["Improve student motivation".to_string(), "Foster collaboration".to_string()],
        )
    }

    fn checkpoint(summary: &str) -> ServiceReply {
        ServiceReply::summary_and_options(
            summary,
            "Any other objectives?",
            vec!["Add a metric".to_string()],
        )
    }

    fn panel(gateway: &StubGateway) -> PanelController<StubGateway> {
        PanelController::new(Purpose::Objective, Arc::new(gateway.clone()))
    }

    #[tokio::test]
    async fn initialize_renders_opening_question() {
        let gateway = StubGateway::new().with_reply(opening());
        let mut panel = panel(&gateway);

        let update = panel.initialize().await.unwrap();

        assert_eq!(update, PanelUpdate::Question);
        assert_eq!(
            panel.view().guiding_question.as_deref(),
            Some("What is the primary goal of your project?")
        );
        assert_eq!(panel.view().options.len(), 2);
        assert!(!panel.is_complete());
        assert_eq!(gateway.calls(), vec![(Purpose::Objective, String::new())]);
    }

    #[tokio::test]
    async fn initialize_failure_shows_notice() {
        let gateway = StubGateway::new().with_failure(GatewayError::network("refused"));
        let mut panel = panel(&gateway);

        let update = panel.initialize().await.unwrap();

        assert_eq!(update, PanelUpdate::TransportFailure);
        assert_eq!(panel.view().output.text(), INITIAL_LOAD_FAILED);
        assert!(!panel.is_complete());
        assert_eq!(panel.state().phase(), PanelPhase::Unloaded);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn checkpoint_completes_panel_and_clears_input() {
        let gateway = StubGateway::new()
            .with_reply(opening())
            .with_reply(checkpoint("Improve motivation in first-year physics"));
        let mut panel = panel(&gateway);
        panel.initialize().await.unwrap();

        let update = panel.submit("  motivation  ").await.unwrap();

        assert_eq!(update, PanelUpdate::Summary);
        assert!(panel.is_complete());
        assert_eq!(
            panel.latest_summary(),
            Some("Improve motivation in first-year physics")
        );
        assert_eq!(panel.view().input, "");
        assert_eq!(
            panel.view().guiding_question.as_deref(),
            Some("Any other objectives?")
        );
        assert_eq!(panel.view().options, vec!["Add a metric"]);
        assert!(panel.view().submit_enabled);
        assert_eq!(gateway.calls()[1], (Purpose::Objective, "motivation".to_string()));
    }

    #[tokio::test]
    async fn summary_only_finalizes_without_options() {
        let gateway = StubGateway::new()
            .with_reply(opening())
            .with_reply(ServiceReply::summary_only("Final objective"));
        let mut panel = panel(&gateway);
        panel.initialize().await.unwrap();

        assert_eq!(panel.submit("done").await.unwrap(), PanelUpdate::Finalized);
        assert_eq!(panel.state().phase(), PanelPhase::Finalized);
        assert!(panel.view().options.is_empty());
        assert_eq!(panel.view().output, PanelOutput::Summary("Final objective".to_string()));
    }

    #[tokio::test]
    async fn error_reply_keeps_prior_summary() {
        let gateway = StubGateway::new()
            .with_reply(checkpoint("First summary"))
            .with_reply(ServiceReply::error("The AI response was not in the expected format."));
        let mut panel = panel(&gateway);
        panel.submit("first").await.unwrap();

        let update = panel.submit("second").await.unwrap();

        assert_eq!(update, PanelUpdate::ReplyError);
        assert!(panel.is_complete());
        assert_eq!(panel.latest_summary(), Some("First summary"));
        assert_eq!(
            panel.view().output,
            PanelOutput::ReplyError("The AI response was not in the expected format.".to_string())
        );
    }

    #[tokio::test]
    async fn transport_failure_leaves_state_and_reenables_submit() {
        let gateway = StubGateway::new()
            .with_reply(checkpoint("Kept"))
            .with_failure(GatewayError::Timeout { timeout_secs: 30 });
        let mut panel = panel(&gateway);
        panel.submit("first").await.unwrap();
        let before = panel.state().clone();

        let update = panel.submit("second").await.unwrap();

        assert_eq!(update, PanelUpdate::TransportFailure);
        assert_eq!(panel.state(), &before);
        assert!(panel.view().submit_enabled);
        assert!(!panel.is_in_flight());
        assert_eq!(panel.view().output.text(), SUBMISSION_FAILED);
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_call() {
        let gateway = StubGateway::new();
        let mut panel = panel(&gateway);

        assert_eq!(panel.submit("   ").await, Err(PanelError::EmptyInput));
        assert_eq!(gateway.call_count(), 0);
        assert!(panel.view().submit_enabled);
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let gateway = StubGateway::new();
        let mut panel = panel(&gateway);

        let text = panel.begin_submit("first").unwrap();
        assert_eq!(text, "first");
        assert!(!panel.view().submit_enabled);
        assert_eq!(panel.view().output, PanelOutput::Thinking);

        assert_eq!(
            panel.begin_submit("second"),
            Err(PanelError::AlreadyInFlight(Purpose::Objective))
        );

        panel.finish(Ok(checkpoint("Done")));
        assert!(panel.begin_submit("third").is_ok());
    }

    #[tokio::test]
    async fn selecting_option_sends_its_exact_text() {
        let gateway = StubGateway::new()
            .with_reply(opening())
            .with_reply(checkpoint("Motivation"));
        let mut panel = panel(&gateway);
        panel.initialize().await.unwrap();

        panel.select_option(0).await.unwrap();

        assert_eq!(
            gateway.calls()[1],
            (Purpose::Objective, "Improve student motivation".to_string())
        );
        assert!(panel.is_complete());
    }

    #[tokio::test]
    async fn selecting_missing_option_is_rejected() {
        let gateway = StubGateway::new().with_reply(opening());
        let mut panel = panel(&gateway);
        panel.initialize().await.unwrap();

        assert_eq!(
            panel.select_option(5).await,
            Err(PanelError::OptionOutOfRange {
                index: 5,
                available: 2
            })
        );
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn question_after_summary_restores_summary_output() {
        let gateway = StubGateway::new()
            .with_reply(checkpoint("Kept summary"))
            .with_reply(ServiceReply::question("Could you clarify?", vec![]));
        let mut panel = panel(&gateway);
        panel.submit("first").await.unwrap();

        assert_eq!(panel.submit("second").await.unwrap(), PanelUpdate::Question);
        assert!(panel.is_complete());
        assert_eq!(panel.view().output, PanelOutput::Summary("Kept summary".to_string()));
        assert_eq!(panel.view().guiding_question.as_deref(), Some("Could you clarify?"));
    }
}
