//! LLM client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! All generation goes through `TextGenerator`.
//!
//! Calls are never retried and carry no local timeout: a failed call is
//! reported once and the user resubmits.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::audit::assembler::PromptBundle;

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// The model used for every generation call. Hardcoded to prevent drift.
pub const MODEL: &str = "gemini-2.5-flash-preview-09-2025";
/// Returned when the response is well-formed but carries no text.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "生成結果が空でした。";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("APIキーが設定されていません。画面上の入力欄にGemini APIキーを入力してください。")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Upstream { status: u16, message: String },
}

impl LlmError {
    /// Single user-displayable message with remediation steps.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::MissingCredential => self.to_string(),
            LlmError::Transport(_) | LlmError::Upstream { .. } => format!(
                "【通信エラー】\n詳細: {}\n\n対策:\n\
                 1. APIキーが正しいか確認してください。\n\
                 2. インターネット接続を確認してください。",
                self
            ),
        }
    }
}

/// The external text-generation collaborator.
///
/// Takes the bundle by value: an assembled prompt is used for exactly one call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: PromptBundle) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: PromptBundle) -> Result<String, LlmError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: &prompt.user_instruction,
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: &prompt.system_instruction,
                }],
            },
        };

        debug!(
            "Gemini call: model={}, system_chars={}, user_chars={}",
            MODEL,
            prompt.system_instruction.chars().count(),
            prompt.user_instruction.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini request failed: {e}");
                LlmError::Transport(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("Status: {}", status.as_u16()));
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        match parsed.text() {
            Some(text) => {
                debug!("Gemini call succeeded: output_chars={}", text.chars().count());
                Ok(text.to_string())
            }
            None => {
                warn!("Gemini returned no candidate text");
                Ok(EMPTY_RESULT_PLACEHOLDER.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn bundle() -> PromptBundle {
        PromptBundle {
            system_instruction: "あなたは監査役です。".to_string(),
            user_instruction: "今週のLP訪問数：50人".to_string(),
        }
    }

    /// Binds a throwaway upstream on an ephemeral port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_blank_key_fails_without_io() {
        let client = GeminiClient::new("http://127.0.0.1:1");
        let err = client.generate("   ", bundle()).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[tokio::test]
    async fn test_success_returns_first_candidate_text() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(
                |Path(model): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(model, format!("{MODEL}:generateContent"));
                    assert_eq!(headers["x-goog-api-key"], "test-key");
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "今週のLP訪問数：50人");
                    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "あなたは監査役です。");
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": "【今週の結論】\n順調"}]}}]
                    }))
                },
            ),
        );
        let base = spawn_upstream(app).await;

        let text = GeminiClient::new(base)
            .generate("test-key", bundle())
            .await
            .unwrap();
        assert_eq!(text, "【今週の結論】\n順調");
    }

    #[tokio::test]
    async fn test_empty_candidates_return_placeholder() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = spawn_upstream(app).await;

        let text = GeminiClient::new(base).generate("k", bundle()).await.unwrap();
        assert_eq!(text, EMPTY_RESULT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_error_status_carries_remote_message() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": { "message": "API key not valid." } })),
                )
            }),
        );
        let base = spawn_upstream(app).await;

        let err = GeminiClient::new(base).generate("k", bundle()).await.unwrap_err();
        match &err {
            LlmError::Upstream { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
        assert!(err
            .user_message()
            .contains("API error (status 400): API key not valid."));
    }

    #[tokio::test]
    async fn test_error_status_without_body_reports_status() {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn_upstream(app).await;

        let err = GeminiClient::new(base).generate("k", bundle()).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::Upstream { status: 503, ref message } if message == "Status: 503"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = GeminiClient::new(format!("http://{addr}"))
            .generate("k", bundle())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
        assert!(err.user_message().starts_with("【通信エラー】"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("https://example.test/");
        assert_eq!(
            client.endpoint(),
            format!("https://example.test/v1beta/models/{MODEL}:generateContent")
        );
    }
}
