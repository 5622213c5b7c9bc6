// Weekly recruiting-funnel audit.
// Classification and delta computation are local and pure; every generated
// report or tool output goes through llm_client with a PromptBundle built here.

pub mod assembler;
pub mod classifier;
pub mod handlers;
pub mod prompts;
pub mod tools;
pub mod trend;

use thiserror::Error;

/// Input problems caught before anything is classified or sent out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("数値を正しく入力してください。（{field}）")]
    InvalidInput { field: &'static str },

    #[error("必須項目が入力されていません。（{field}）")]
    MissingRequiredField { field: &'static str },
}
