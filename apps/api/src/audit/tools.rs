//! Rescue tools offered alongside a report.
//!
//! Each tool has exactly one field that must be filled in before anything is
//! sent to the generator.

use serde::{Deserialize, Serialize};

use crate::audit::AuditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    TitleGeneration,
    TextRewrite,
    PhotoDirection,
    ReplyDraft,
    InterviewQuestions,
}

/// A tool invocation with the fields its form panel collects.
///
/// Text fields default to empty so a missing field surfaces as
/// `MissingRequiredField` rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolRequest {
    TitleGeneration {
        #[serde(default)]
        job_type: String,
    },
    TextRewrite {
        #[serde(default)]
        original_text: String,
    },
    PhotoDirection {
        #[serde(default)]
        photo_appeal: String,
    },
    ReplyDraft {
        #[serde(default)]
        reply_type: Option<String>,
        #[serde(default)]
        reply_details: String,
    },
    InterviewQuestions {
        #[serde(default)]
        target_persona: String,
    },
}

impl ToolRequest {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::TitleGeneration { .. } => ToolKind::TitleGeneration,
            ToolRequest::TextRewrite { .. } => ToolKind::TextRewrite,
            ToolRequest::PhotoDirection { .. } => ToolKind::PhotoDirection,
            ToolRequest::ReplyDraft { .. } => ToolKind::ReplyDraft,
            ToolRequest::InterviewQuestions { .. } => ToolKind::InterviewQuestions,
        }
    }

    /// The distinguishing field: its name and current value.
    pub fn required_field(&self) -> (&'static str, &str) {
        match self {
            ToolRequest::TitleGeneration { job_type } => ("job_type", job_type),
            ToolRequest::TextRewrite { original_text } => ("original_text", original_text),
            ToolRequest::PhotoDirection { photo_appeal } => ("photo_appeal", photo_appeal),
            ToolRequest::ReplyDraft { reply_details, .. } => ("reply_details", reply_details),
            ToolRequest::InterviewQuestions { target_persona } => {
                ("target_persona", target_persona)
            }
        }
    }

    /// Fails with `MissingRequiredField` when the distinguishing field is blank.
    pub fn validate(&self) -> Result<(), AuditError> {
        let (field, value) = self.required_field();
        if value.trim().is_empty() {
            return Err(AuditError::MissingRequiredField { field });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_request_deserializes_by_tag() {
        let req: ToolRequest =
            serde_json::from_str(r#"{"tool":"photo_direction","photo_appeal":"新しい工具"}"#)
                .unwrap();
        assert_eq!(req.kind(), ToolKind::PhotoDirection);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_field_defaults_to_empty_and_fails_validation() {
        let req: ToolRequest = serde_json::from_str(r#"{"tool":"interview_questions"}"#).unwrap();
        assert_eq!(
            req.validate(),
            Err(AuditError::MissingRequiredField {
                field: "target_persona"
            })
        );
    }

    #[test]
    fn test_each_kind_names_its_own_field() {
        let cases = [
            (
                ToolRequest::TitleGeneration {
                    job_type: " ".into(),
                },
                "job_type",
            ),
            (
                ToolRequest::TextRewrite {
                    original_text: String::new(),
                },
                "original_text",
            ),
            (
                ToolRequest::PhotoDirection {
                    photo_appeal: "\n".into(),
                },
                "photo_appeal",
            ),
            (
                ToolRequest::ReplyDraft {
                    reply_type: Some("面接日程の確定".into()),
                    reply_details: String::new(),
                },
                "reply_details",
            ),
            (
                ToolRequest::InterviewQuestions {
                    target_persona: String::new(),
                },
                "target_persona",
            ),
        ];
        for (req, field) in cases {
            assert_eq!(req.validate(), Err(AuditError::MissingRequiredField { field }));
        }
    }
}
