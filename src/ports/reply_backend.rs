//! Reply Backend Port - what the relay server delegates each request to.
//!
//! A backend turns a validated `(purpose, user_input)` pair into a
//! `ServiceReply`. Two adapters exist: a process relay that hands the input
//! to an external generation process, and a native engine that calls an AI
//! provider directly.

use async_trait::async_trait;

use crate::domain::foundation::Purpose;
use crate::domain::guide::{ServiceReply, SummaryContext};

/// Port for producing replies on the server side.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Generates the reply for one request.
    ///
    /// A reply of any shape, including `ServiceReply::Error`, is a normal
    /// outcome. `Err` means the backend itself failed.
    async fn generate(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, BackendError>;

    /// Generates the reply with the summaries the caller's session has
    /// completed so far. Backends that cannot use them ignore the context.
    async fn generate_in_context(
        &self,
        purpose: Purpose,
        user_input: &str,
        _context: &SummaryContext,
    ) -> Result<ServiceReply, BackendError> {
        self.generate(purpose, user_input).await
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Backend failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The generation process wrote to its diagnostic channel or exited
    /// unsuccessfully. Carries the raw diagnostic text.
    #[error("{0}")]
    Diagnostic(String),

    /// The generation process could not be started.
    #[error("failed to start generation process: {0}")]
    Spawn(String),

    /// Piping data to or from the process failed.
    #[error("i/o error talking to generation process: {0}")]
    Io(String),

    /// The backend did not finish in time.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Output was not a recognizable reply.
    #[error("malformed backend output: {0}")]
    MalformedOutput(String),
}

impl BackendError {
    /// True when the error carries backend diagnostics meant for the user,
    /// as opposed to a failure of the relay itself.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, BackendError::Diagnostic(_))
    }
}
