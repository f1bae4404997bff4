//! IntegrationController - synthesizes the proposal from completed panels.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::Purpose;
use crate::domain::guide::{AggregateState, ServiceReply};
use crate::ports::{ConversationGateway, GatewayError};

use super::view::{
    IntegrationOutput, IntegrationView, INTEGRATION_FAILED, INTEGRATION_NETWORK_FAILED,
    NO_COMPLETED_STEPS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    #[error("a synthesis request is already in flight")]
    AlreadyInFlight,

    #[error("no panel has a summary yet")]
    NoCompletedSteps,
}

/// How a finished synthesis ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// The proposal document was rendered.
    Document,
    /// The service replied without a document.
    Failed,
    /// No reply arrived.
    TransportFailure,
}

pub struct IntegrationController<G: ?Sized + ConversationGateway> {
    gateway: Arc<G>,
    view: IntegrationView,
    in_flight: bool,
}

impl<G: ?Sized + ConversationGateway> IntegrationController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            view: IntegrationView::default(),
            in_flight: false,
        }
    }

    pub fn view(&self) -> &IntegrationView {
        &self.view
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Builds the integrator payload from `aggregate` and claims the trigger.
    ///
    /// With nothing complete the prompt is shown and no request should be
    /// sent.
    pub fn begin_synthesis(&mut self, aggregate: &AggregateState) -> Result<String, IntegrationError> {
        if self.in_flight {
            return Err(IntegrationError::AlreadyInFlight);
        }
        let Some(payload) = aggregate.combined_input() else {
            self.view.output = IntegrationOutput::Prompt(NO_COMPLETED_STEPS.to_string());
            return Err(IntegrationError::NoCompletedSteps);
        };

        self.in_flight = true;
        self.view.trigger_enabled = false;
        self.view.output = IntegrationOutput::Synthesizing;
        Ok(payload)
    }

    /// Renders the outcome of the round trip started by `begin_synthesis`.
    pub fn finish_synthesis(&mut self, outcome: Result<ServiceReply, GatewayError>) -> SynthesisOutcome {
        self.in_flight = false;
        self.view.trigger_enabled = true;

        match outcome {
            Ok(
                ServiceReply::SummaryAndOptions { summary, .. } | ServiceReply::SummaryOnly { summary },
            ) => {
                self.view.output = IntegrationOutput::Document(summary);
                SynthesisOutcome::Document
            }
            Ok(reply) => {
                let message = reply
                    .summary()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(INTEGRATION_FAILED)
                    .to_string();
                tracing::warn!(kind = reply.kind(), %message, "synthesis did not produce a document");
                self.view.output = IntegrationOutput::Failed(message);
                SynthesisOutcome::Failed
            }
            Err(err) => {
                tracing::warn!(error = %err, "synthesis request failed");
                self.view.output = IntegrationOutput::Failed(INTEGRATION_NETWORK_FAILED.to_string());
                SynthesisOutcome::TransportFailure
            }
        }
    }

    /// Sends the combined summaries with the integrator purpose.
    pub async fn synthesize(&mut self, aggregate: &AggregateState) -> Result<SynthesisOutcome, IntegrationError> {
        let payload = self.begin_synthesis(aggregate)?;
        tracing::debug!(
            sections = aggregate.completed_count(),
            "requesting proposal synthesis"
        );
        let outcome = self.gateway.send(Purpose::Integrator, &payload).await;
        Ok(self.finish_synthesis(outcome))
    }
}
