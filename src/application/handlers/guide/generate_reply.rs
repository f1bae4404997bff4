//! GuidedReplyEngine - Native reply backend backed by an AI provider.
//!
//! Empty input gets the purpose's opening question from the catalog with no
//! model call. Anything else is sent to the model under the purpose's
//! persona; panel answers are parsed from the JSON the persona asks for, and
//! the integrator's answer is passed through as the final document.
//!
//! When the relay session has completed panels, their summaries head the
//! system prompt so later panels build on earlier ones.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AiConfig;
use crate::domain::foundation::Purpose;
use crate::domain::guide::{guide_for, ServiceReply, SummaryContext};
use crate::ports::{AIProvider, BackendError, CompletionRequest, MessageRole, ReplyBackend};

pub const UNEXPECTED_FORMAT_MESSAGE: &str =
    "The AI response was not in the expected format. Please try again.";

const MISSING_EXPLANATION: &str = "AI did not provide an explanation.";
const MISSING_FOLLOW_UP: &str = "AI did not provide a follow-up question.";
const MISSING_SUMMARY: &str = "AI did not provide a summary.";

/// Shape the panel personas ask the model to answer in.
#[derive(Debug, Deserialize)]
struct PanelAnswer {
    explanation: Option<String>,
    follow_up_question: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    suggested_questions: Vec<String>,
}

impl PanelAnswer {
    fn into_reply(self) -> ServiceReply {
        ServiceReply::SummaryAndOptions {
            summary: self.summary.unwrap_or_else(|| MISSING_SUMMARY.to_string()),
            follow_up_question: self
                .follow_up_question
                .unwrap_or_else(|| MISSING_FOLLOW_UP.to_string()),
            suggested_options: self.suggested_questions,
            explanation: Some(
                self.explanation
                    .unwrap_or_else(|| MISSING_EXPLANATION.to_string()),
            ),
        }
    }
}

/// Strips a surrounding Markdown code fence, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

/// Parses a panel model answer into a reply.
pub fn parse_panel_answer(text: &str) -> ServiceReply {
    match serde_json::from_str::<PanelAnswer>(strip_code_fence(text)) {
        Ok(answer) => answer.into_reply(),
        Err(e) => {
            tracing::warn!(error = %e, "model answer was not the expected JSON");
            ServiceReply::error(UNEXPECTED_FORMAT_MESSAGE)
        }
    }
}

/// Reply backend that calls the AI provider in-process.
pub struct GuidedReplyEngine<P: ?Sized + AIProvider> {
    provider: Arc<P>,
    max_tokens: u32,
    temperature: f32,
}

impl<P: ?Sized + AIProvider> GuidedReplyEngine<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            max_tokens: 1000,
            temperature: 0.5,
        }
    }

    pub fn from_config(provider: Arc<P>, config: &AiConfig) -> Self {
        Self::new(provider)
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn completion_request(
        &self,
        purpose: Purpose,
        user_input: &str,
        context: &SummaryContext,
    ) -> CompletionRequest {
        let system_prompt = format!(
            "{}{}",
            context.prompt_prefix(),
            guide_for(purpose).system_prompt()
        );
        CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, user_input)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_purpose(purpose)
    }

    /// Produces the reply for one request with no session context.
    pub async fn reply(&self, purpose: Purpose, user_input: &str) -> ServiceReply {
        self.reply_in_context(purpose, user_input, &SummaryContext::new())
            .await
    }

    /// Produces the reply for one request. Every failure becomes an
    /// `error` reply.
    pub async fn reply_in_context(
        &self,
        purpose: Purpose,
        user_input: &str,
        context: &SummaryContext,
    ) -> ServiceReply {
        let guide = guide_for(purpose);

        if user_input.trim().is_empty() {
            if let Some(question) = guide.initial_question {
                return ServiceReply::question(question, guide.options_owned());
            }
        }

        let completion = match self
            .provider
            .complete(self.completion_request(purpose, user_input, context))
            .await
        {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!(%purpose, error = %e, "AI completion failed");
                return ServiceReply::error(format!(
                    "An error occurred during AI processing: {}",
                    e
                ));
            }
        };

        tracing::debug!(
            %purpose,
            model = %completion.model,
            tokens = completion.usage.total_tokens,
            "AI completion received"
        );

        if purpose.is_integrator() {
            ServiceReply::summary_only(completion.content)
        } else {
            parse_panel_answer(&completion.content)
        }
    }
}

#[async_trait]
impl<P: ?Sized + AIProvider> ReplyBackend for GuidedReplyEngine<P> {
    async fn generate(&self, purpose: Purpose, user_input: &str) -> Result<ServiceReply, BackendError> {
        Ok(self.reply(purpose, user_input).await)
    }

    async fn generate_in_context(
        &self,
        purpose: Purpose,
        user_input: &str,
        context: &SummaryContext,
    ) -> Result<ServiceReply, BackendError> {
        Ok(self.reply_in_context(purpose, user_input, context).await)
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
