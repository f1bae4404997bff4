//! Stub Conversation Gateway for testing.
//!
//! Replies come from a queue first, then from an optional responder
//! function. Every call is recorded for verification.
//!
//! ```ignore
//! let gateway = StubGateway::new()
//!     .with_reply(ServiceReply::question("What is your goal?", vec![]))
//!     .with_failure(GatewayError::network("connection refused"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Purpose;
use crate::domain::guide::ServiceReply;
use crate::ports::{ConversationGateway, GatewayError};

type Responder = Arc<dyn Fn(Purpose, &str) -> Result<ServiceReply, GatewayError> + Send + Sync>;

/// Scriptable gateway; clones share queue and call history.
#[derive(Clone, Default)]
pub struct StubGateway {
    queue: Arc<Mutex<VecDeque<Result<ServiceReply, GatewayError>>>>,
    responder: Option<Responder>,
    delay: Duration,
    calls: Arc<Mutex<Vec<(Purpose, String)>>>,
}

impl fmt::Debug for StubGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubGateway")
            .field("queued", &lock(&self.queue).len())
            .field("has_responder", &self.responder.is_some())
            .field("delay", &self.delay)
            .field("calls", &lock(&self.calls).len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    pub fn with_reply(self, reply: ServiceReply) -> Self {
        self.push(Ok(reply));
        self
    }

    /// Queues a transport failure.
    pub fn with_failure(self, error: GatewayError) -> Self {
        self.push(Err(error));
        self
    }

    /// Answers any call the queue does not cover.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(Purpose, &str) -> Result<ServiceReply, GatewayError> + Send + Sync + 'static,
    {
        self.responder = Some(Arc::new(responder));
        self
    }

    /// Simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues an outcome on a gateway already handed to a controller.
    pub fn push(&self, outcome: Result<ServiceReply, GatewayError>) {
        lock(&self.queue).push_back(outcome);
    }

    pub fn calls(&self) -> Vec<(Purpose, String)> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls_for(&self, purpose: Purpose) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter(|(p, _)| *p == purpose)
            .map(|(_, input)| input.clone())
            .collect()
    }
}

#[async_trait]
impl ConversationGateway for StubGateway {
    async fn send(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, GatewayError> {
        lock(&self.calls).push((purpose, user_input.to_string()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = lock(&self.queue).pop_front();
        match (queued, &self.responder) {
            (Some(outcome), _) => outcome,
            (None, Some(responder)) => responder(purpose, user_input),
            (None, None) => Err(GatewayError::network("no stubbed reply")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_drains_before_responder() {
        let gateway = StubGateway::new()
            .with_reply(ServiceReply::summary_only("queued"))
            .with_responder(|purpose, input| {
                Ok(ServiceReply::summary_only(format!("{}:{}", purpose, input)))
            });

        assert_eq!(
            gateway.send(Purpose::Objective, "a").await.unwrap(),
            ServiceReply::summary_only("queued")
        );
        assert_eq!(
            gateway.send(Purpose::Outcomes, "b").await.unwrap(),
            ServiceReply::summary_only("outcomes:b")
        );
    }

    #[tokio::test]
    async fn empty_stub_fails_as_network_error() {
        let gateway = StubGateway::new();
        assert!(matches!(
            gateway.send(Purpose::Objective, "").await,
            Err(GatewayError::Network(_))
        ));
    }

    #[tokio::test]
    async fn records_calls_across_clones() {
        let gateway = StubGateway::new().with_responder(|_, _| Ok(ServiceReply::error("x")));
        let shared = gateway.clone();

        shared.send(Purpose::Pedagogy, "first").await.unwrap();
        shared.send(Purpose::Evaluation, "second").await.unwrap();

        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.calls_for(Purpose::Pedagogy), vec!["first"]);
        assert_eq!(
            gateway.calls()[1],
            (Purpose::Evaluation, "second".to_string())
        );
    }
}
