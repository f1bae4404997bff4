//! Framework-neutral view models rendered by the client controllers.

use serde::Serialize;

pub const INITIAL_LOAD_FAILED: &str = "Could not load initial question.";
pub const THINKING: &str = "Thinking...";
pub const SUBMISSION_FAILED: &str = "An error occurred during submission.";
pub const NO_COMPLETED_STEPS: &str = "Please complete some steps first.";
pub const SYNTHESIZING: &str = "Synthesizing...";
pub const INTEGRATION_FAILED: &str = "Integration failed";
pub const INTEGRATION_NETWORK_FAILED: &str = "Sorry, an error occurred during integration.";

/// What a panel's output area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PanelOutput {
    Empty,
    /// A request is in flight.
    Thinking,
    /// The latest accepted summary.
    Summary(String),
    /// Error text from an `error` reply.
    ReplyError(String),
    /// Local notice, such as a network failure.
    Notice(String),
}

impl PanelOutput {
    pub fn text(&self) -> &str {
        match self {
            PanelOutput::Empty => "",
            PanelOutput::Thinking => THINKING,
            PanelOutput::Summary(text)
            | PanelOutput::ReplyError(text)
            | PanelOutput::Notice(text) => text,
        }
    }
}

/// Everything one panel renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub guiding_question: Option<String>,
    pub options: Vec<String>,
    pub explanation: Option<String>,
    pub output: PanelOutput,
    pub input: String,
    pub submit_enabled: bool,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            guiding_question: None,
            options: Vec::new(),
            explanation: None,
            output: PanelOutput::Empty,
            input: String::new(),
            submit_enabled: true,
        }
    }
}

/// What the integration area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum IntegrationOutput {
    Empty,
    /// Asks the user to finish some panels first.
    Prompt(String),
    Synthesizing,
    /// The synthesized proposal.
    Document(String),
    Failed(String),
}

impl IntegrationOutput {
    pub fn text(&self) -> &str {
        match self {
            IntegrationOutput::Empty => "",
            IntegrationOutput::Synthesizing => SYNTHESIZING,
            IntegrationOutput::Prompt(text)
            | IntegrationOutput::Document(text)
            | IntegrationOutput::Failed(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationView {
    pub output: IntegrationOutput,
    pub trigger_enabled: bool,
}

impl Default for IntegrationView {
    fn default() -> Self {
        Self {
            output: IntegrationOutput::Empty,
            trigger_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_text_matches_variant() {
        assert_eq!(PanelOutput::Empty.text(), "");
        assert_eq!(PanelOutput::Thinking.text(), "Thinking...");
        assert_eq!(PanelOutput::Summary("s".to_string()).text(), "s");
        assert_eq!(IntegrationOutput::Synthesizing.text(), "Synthesizing...");
    }

    #[test]
    fn fresh_views_accept_input() {
        assert!(PanelView::default().submit_enabled);
        assert!(IntegrationView::default().trigger_enabled);
    }

    #[test]
    fn output_serializes_with_kind_tag() {
        let json = serde_json::to_value(PanelOutput::ReplyError("bad".to_string())).unwrap();
        assert_eq!(json["kind"], "reply_error");
        assert_eq!(json["text"], "bad");
    }
}
