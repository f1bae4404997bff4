//! Request and reply shapes exchanged with the conversation service.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Purpose;

/// One round trip's input: which panel is asking, and what the user typed.
///
/// Empty `user_input` asks the service for the panel's opening question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRequest {
    #[serde(rename = "userInput")]
    pub user_input: String,
    pub purpose: Purpose,
}

impl GuideRequest {
    pub fn new(purpose: Purpose, user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            purpose,
        }
    }

    /// Request for a panel's opening question.
    pub fn opening(purpose: Purpose) -> Self {
        Self::new(purpose, String::new())
    }
}

/// Normalized reply from the conversation service, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceReply {
    /// Opening or refinement prompt.
    Question {
        question: String,
        #[serde(default)]
        options: Vec<String>,
    },

    /// Checkpoint summary with a follow-up prompt and suggested refinements.
    SummaryAndOptions {
        summary: String,
        #[serde(default)]
        follow_up_question: String,
        #[serde(
            default,
            rename = "suggested_questions",
            alias = "new_options"
        )]
        suggested_options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },

    /// Terminal summary with nothing further to ask.
    SummaryOnly { summary: String },

    /// Failure surfaced by the backend; `summary` carries the message.
    Error { summary: String },
}

impl ServiceReply {
    pub fn question(question: impl Into<String>, options: Vec<String>) -> Self {
        ServiceReply::Question {
            question: question.into(),
            options,
        }
    }

    pub fn summary_and_options(
        summary: impl Into<String>,
        follow_up_question: impl Into<String>,
        suggested_options: Vec<String>,
    ) -> Self {
        ServiceReply::SummaryAndOptions {
            summary: summary.into(),
            follow_up_question: follow_up_question.into(),
            suggested_options,
            explanation: None,
        }
    }

    pub fn summary_only(summary: impl Into<String>) -> Self {
        ServiceReply::SummaryOnly {
            summary: summary.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServiceReply::Error {
            summary: message.into(),
        }
    }

    /// Wire name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceReply::Question { .. } => "question",
            ServiceReply::SummaryAndOptions { .. } => "summary_and_options",
            ServiceReply::SummaryOnly { .. } => "summary_only",
            ServiceReply::Error { .. } => "error",
        }
    }

    /// The `summary` field, present on every shape except `question`.
    pub fn summary(&self) -> Option<&str> {
        match self {
            ServiceReply::Question { .. } => None,
            ServiceReply::SummaryAndOptions { summary, .. }
            | ServiceReply::SummaryOnly { summary }
            | ServiceReply::Error { summary } => Some(summary),
        }
    }

    /// True for the two shapes that complete a panel.
    pub fn is_summary(&self) -> bool {
        matches!(
            self,
            ServiceReply::SummaryAndOptions { .. } | ServiceReply::SummaryOnly { .. }
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ServiceReply::Error { .. })
    }
}
