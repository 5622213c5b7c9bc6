//! Prompt assembly, one builder per prompt kind.
//!
//! Every builder validates its required fields before rendering, so a prompt
//! that reaches the generator is always complete. Assembly is pure: no I/O,
//! no generator call.

use serde::Serialize;

use crate::audit::classifier::REPORT_SIGNATURE;
use crate::audit::prompts::*;
use crate::audit::tools::ToolRequest;
use crate::audit::trend::{
    classify_with_trend, success_threshold, Delta, TrendDeltas, APPLICATIONS_UNIT, CLICKS_UNIT,
    VISITS_UNIT,
};
use crate::audit::{classifier, AuditError};
use crate::llm_client::prompts::{forbidden_terms_instruction, SAFETY_INSTRUCTION};
use crate::models::form::{Industry, SourceChannel};

/// System framing plus user data for one generation call.
///
/// Not `Clone`: consumed by the generator call.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PromptBundle {
    pub system_instruction: String,
    pub user_instruction: String,
}

pub trait PromptBuilder {
    /// What validation proves about the builder, handed on to `render`.
    type Checked;

    fn validate(&self) -> Result<Self::Checked, AuditError>;

    fn render(&self, checked: Self::Checked) -> PromptBundle;

    fn build(&self) -> Result<PromptBundle, AuditError> {
        let checked = self.validate()?;
        Ok(self.render(checked))
    }
}

/// Fills `{name}` placeholders in a single pass over `template`.
/// Inserted values are never rescanned; unknown placeholders are left as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// AI-tier audit
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BasicAuditPrompt {
    pub industry: Industry,
    pub source: SourceChannel,
    pub visits: u32,
    pub clicks: u32,
}

impl PromptBuilder for BasicAuditPrompt {
    type Checked = ();

    fn validate(&self) -> Result<(), AuditError> {
        // Counts are parsed into u32 before the builder exists.
        Ok(())
    }

    fn render(&self, _: ()) -> PromptBundle {
        let industry = self.industry.label();
        PromptBundle {
            system_instruction: fill(
                BASIC_AUDIT_SYSTEM_TEMPLATE,
                &[
                    ("industry", industry),
                    ("forbidden_terms", forbidden_terms_instruction().as_str()),
                    ("signature", REPORT_SIGNATURE),
                ],
            ),
            user_instruction: fill(
                BASIC_AUDIT_USER_TEMPLATE,
                &[
                    ("industry", industry),
                    ("visits", self.visits.to_string().as_str()),
                    ("clicks", self.clicks.to_string().as_str()),
                    ("source", self.source.label()),
                ],
            ),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Weekly comparison report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct WeeklyReportPrompt {
    pub industry: Industry,
    pub source: SourceChannel,
    pub visits_current: Option<u32>,
    pub clicks_current: Option<u32>,
    pub visits_previous: Option<u32>,
    pub clicks_previous: Option<u32>,
    pub applications: Option<u32>,
    pub recent_changes: Option<String>,
}

/// The four counts a weekly report cannot do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCounts {
    pub visits_current: u32,
    pub clicks_current: u32,
    pub visits_previous: u32,
    pub clicks_previous: u32,
}

impl WeeklyReportPrompt {
    fn render_facts(&self, trend: &TrendDeltas) -> String {
        let mut lines = Vec::new();

        let ratio = |delta: &Delta| match delta.percent_change() {
            Some(p) if !trend.ratios_suppressed => format!("（前週比{p:+}%）"),
            _ => String::new(),
        };

        lines.push(format!(
            "- LP訪問数：今週{}{VISITS_UNIT}／前週{}{VISITS_UNIT}（差 {}）{}",
            trend.visits.current,
            trend.visits.previous,
            trend.visits.render(VISITS_UNIT),
            ratio(&trend.visits)
        ));
        lines.push(format!(
            "- LINE/電話ボタンのクリック数：今週{}{CLICKS_UNIT}／前週{}{CLICKS_UNIT}（差 {}）{}",
            trend.clicks.current,
            trend.clicks.previous,
            trend.clicks.render(CLICKS_UNIT),
            ratio(&trend.clicks)
        ));
        if let Some(rate) = classifier::rate_per_hundred(trend.visits.current, trend.clicks.current)
        {
            lines.push(format!("- 今週、100人が見たときに反応する人数：{rate}人"));
        }
        if let Some(applications) = trend.applications {
            lines.push(format!("- 今週の応募数：{applications}{APPLICATIONS_UNIT}"));
        }
        if let Some(changes) = self
            .recent_changes
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            lines.push(format!("- 今週変えたこと：{changes}"));
        }
        if trend.ratios_suppressed {
            lines.push("- 前週が0の項目があるため、前週比は出さない。".to_string());
        }
        lines.push(format!(
            "- 来週の成功ライン：クリック数 {}",
            success_threshold(trend.clicks.current, trend.ratios_suppressed)
        ));

        lines.join("\n")
    }
}

impl PromptBuilder for WeeklyReportPrompt {
    type Checked = WeeklyCounts;

    fn validate(&self) -> Result<WeeklyCounts, AuditError> {
        let require = |value: Option<u32>, field: &'static str| {
            value.ok_or(AuditError::MissingRequiredField { field })
        };
        Ok(WeeklyCounts {
            visits_current: require(self.visits_current, "visits_current")?,
            clicks_current: require(self.clicks_current, "clicks_current")?,
            visits_previous: require(self.visits_previous, "visits_previous")?,
            clicks_previous: require(self.clicks_previous, "clicks_previous")?,
        })
    }

    fn render(&self, counts: WeeklyCounts) -> PromptBundle {
        let trend = classify_with_trend(
            counts.visits_current,
            counts.clicks_current,
            counts.visits_previous,
            counts.clicks_previous,
            self.applications,
        );
        let industry = self.industry.label();

        PromptBundle {
            system_instruction: fill(
                WEEKLY_REPORT_SYSTEM_TEMPLATE,
                &[
                    ("industry", industry),
                    ("forbidden_terms", forbidden_terms_instruction().as_str()),
                    ("signature", REPORT_SIGNATURE),
                ],
            ),
            user_instruction: format!(
                "業種：{industry}\n主な流入元：{}\n\n確定した事実（計算済み。数字を変えないこと）：\n{}",
                self.source.label(),
                self.render_facts(&trend)
            ),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rescue tools
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ToolPrompt {
    pub industry: Industry,
    pub source: SourceChannel,
    pub request: ToolRequest,
}

impl PromptBuilder for ToolPrompt {
    type Checked = ();

    fn validate(&self) -> Result<(), AuditError> {
        self.request.validate()
    }

    fn render(&self, _: ()) -> PromptBundle {
        let (system_template, user_instruction) = match &self.request {
            ToolRequest::TitleGeneration { job_type } => (
                TITLE_SYSTEM_TEMPLATE,
                fill(
                    TITLE_USER_TEMPLATE,
                    &[("job_type", job_type.trim()), ("source", self.source.label())],
                ),
            ),
            ToolRequest::TextRewrite { original_text } => (
                REWRITE_SYSTEM_TEMPLATE,
                fill(REWRITE_USER_TEMPLATE, &[("original_text", original_text.trim())]),
            ),
            ToolRequest::PhotoDirection { photo_appeal } => (
                PHOTO_SYSTEM_TEMPLATE,
                fill(PHOTO_USER_TEMPLATE, &[("photo_appeal", photo_appeal.trim())]),
            ),
            ToolRequest::ReplyDraft {
                reply_type,
                reply_details,
            } => {
                let reply_type = reply_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(DEFAULT_REPLY_TYPE);
                (
                    REPLY_SYSTEM_TEMPLATE,
                    fill(
                        REPLY_USER_TEMPLATE,
                        &[
                            ("reply_type", reply_type),
                            ("reply_details", reply_details.trim()),
                        ],
                    ),
                )
            }
            ToolRequest::InterviewQuestions { target_persona } => (
                INTERVIEW_SYSTEM_TEMPLATE,
                fill(INTERVIEW_USER_TEMPLATE, &[("target_persona", target_persona.trim())]),
            ),
        };

        PromptBundle {
            system_instruction: fill(
                system_template,
                &[
                    ("industry", self.industry.label()),
                    ("safety", SAFETY_INSTRUCTION),
                ],
            ),
            user_instruction,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum PromptRequest {
    BasicAudit(BasicAuditPrompt),
    WeeklyReport(WeeklyReportPrompt),
    Tool(ToolPrompt),
}

/// Validates and renders any prompt kind.
pub fn assemble_prompt(request: &PromptRequest) -> Result<PromptBundle, AuditError> {
    match request {
        PromptRequest::BasicAudit(p) => p.build(),
        PromptRequest::WeeklyReport(p) => p.build(),
        PromptRequest::Tool(p) => p.build(),
    }
}
