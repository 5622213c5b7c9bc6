use serde::{Deserialize, Serialize};

use crate::audit::AuditError;

/// Industry selected on the form. Closed set; the label is what the
/// prompts show to the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    #[default]
    Construction,
    Care,
    AutoMaintenance,
    General,
}

impl Industry {
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Construction => "建設・建築",
            Industry::Care => "介護・福祉",
            Industry::AutoMaintenance => "自動車整備・車検",
            Industry::General => "一般企業",
        }
    }
}

/// Where most of this week's visitors came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceChannel {
    #[default]
    Indeed,
    GoogleBusinessProfile,
    Flyer,
    Sns,
    Other,
}

impl SourceChannel {
    pub fn label(&self) -> &'static str {
        match self {
            SourceChannel::Indeed => "Indeed",
            SourceChannel::GoogleBusinessProfile => "Googleビジネスプロフィール",
            SourceChannel::Flyer => "求人チラシ",
            SourceChannel::Sns => "SNS",
            SourceChannel::Other => "その他",
        }
    }
}

/// Fields every form submission carries, regardless of the action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormContext {
    /// Identifies the form. One action may be in flight per client at a time.
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub source_channel: SourceChannel,
}

/// A count as typed into the form: browsers send either a number or the
/// raw text of a number input. Any other JSON value lands in `Other` so it is
/// rejected as `InvalidInput` for its field instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl RawCount {
    /// Parses into a non-negative count, or `InvalidInput` naming `field`.
    pub fn parse(&self, field: &'static str) -> Result<u32, AuditError> {
        let invalid = || AuditError::InvalidInput { field };
        match self {
            RawCount::Number(n) => u32::try_from(*n).map_err(|_| invalid()),
            RawCount::Text(s) => {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                s.parse::<u32>().map_err(|_| invalid())
            }
            RawCount::Other(_) => Err(invalid()),
        }
    }
}

/// Parses a mandatory count; absent counts are invalid input.
pub fn parse_required(raw: Option<&RawCount>, field: &'static str) -> Result<u32, AuditError> {
    raw.ok_or(AuditError::InvalidInput { field })?.parse(field)
}

/// Parses an optional count. Absent or blank text means "not supplied".
pub fn parse_optional(raw: Option<&RawCount>, field: &'static str) -> Result<Option<u32>, AuditError> {
    match raw {
        None => Ok(None),
        Some(RawCount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => raw.parse(field).map(Some),
    }
}
