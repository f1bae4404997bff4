//! HTTP DTOs for the chat relay endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Purpose;
use crate::domain::guide::{ServiceReply, SummaryContext};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. 'userInput' and 'purpose' are required.";

/// Incoming chat request; both fields are optional here so their absence
/// can be reported with the relay's own error reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequestDto {
    #[serde(rename = "userInput")]
    pub user_input: Option<String>,
    pub purpose: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidChatRequest {
    pub purpose: Purpose,
    pub user_input: String,
}

impl ChatRequestDto {
    /// Checks presence of both fields, then the purpose value.
    pub fn validate(self) -> Result<ValidChatRequest, ServiceReply> {
        let (Some(user_input), Some(purpose)) = (self.user_input, self.purpose) else {
            return Err(ServiceReply::error(INVALID_INPUT_MESSAGE));
        };

        let purpose = purpose
            .parse::<Purpose>()
            .map_err(|_| ServiceReply::error(format!("Invalid 'purpose' provided: {}", purpose)))?;

        Ok(ValidChatRequest {
            purpose,
            user_input,
        })
    }
}

/// Outgoing reply, with the session's summaries after a generated reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponseDto {
    #[serde(flatten)]
    pub reply: ServiceReply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_summary_state: Option<BTreeMap<String, String>>,
}

impl ChatResponseDto {
    pub fn bare(reply: ServiceReply) -> Self {
        Self {
            reply,
            full_summary_state: None,
        }
    }

    pub fn in_session(reply: ServiceReply, context: &SummaryContext) -> Self {
        Self {
            reply,
            full_summary_state: Some(context.full_state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(json: &str) -> ChatRequestDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_empty_user_input() {
        let valid = dto(r#"{"userInput":"","purpose":"objective"}"#)
            .validate()
            .unwrap();
        assert_eq!(valid.purpose, Purpose::Objective);
        assert_eq!(valid.user_input, "");
    }

    #[test]
    fn missing_field_is_invalid_input() {
        let err = dto(r#"{"purpose":"objective"}"#).validate().unwrap_err();
        assert_eq!(err, ServiceReply::error(INVALID_INPUT_MESSAGE));

        let err = dto(r#"{"userInput":"x","purpose":null}"#).validate().unwrap_err();
        assert_eq!(err, ServiceReply::error(INVALID_INPUT_MESSAGE));
    }

    #[test]
    fn unknown_purpose_is_named() {
        let err = dto(r#"{"userInput":"x","purpose":"budget"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ServiceReply::error("Invalid 'purpose' provided: budget"));
    }

    #[test]
    fn integrator_is_a_valid_purpose() {
        let valid = dto(r#"{"userInput":"--- A ---\nx","purpose":"integrator"}"#)
            .validate()
            .unwrap();
        assert_eq!(valid.purpose, Purpose::Integrator);
    }

    #[test]
    fn response_flattens_reply_next_to_summary_state() {
        let mut context = SummaryContext::new();
        context.record(Purpose::Objective, &ServiceReply::summary_only("Raise motivation"));

        let body = serde_json::to_value(ChatResponseDto::in_session(
            ServiceReply::summary_only("Raise motivation"),
            &context,
        ))
        .unwrap();

        assert_eq!(body["type"], "summary_only");
        assert_eq!(body["summary"], "Raise motivation");
        assert_eq!(body["full_summary_state"]["objective"], "Raise motivation");
        assert_eq!(body["full_summary_state"]["pedagogy"], "");

        let bare = serde_json::to_value(ChatResponseDto::bare(ServiceReply::error("x"))).unwrap();
        assert!(bare.get("full_summary_state").is_none());
    }
}
