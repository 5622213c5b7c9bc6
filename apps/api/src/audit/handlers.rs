//! Axum route handlers for the audit reports and rescue tools.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::audit::assembler::{
    assemble_prompt, BasicAuditPrompt, PromptBundle, PromptRequest, ToolPrompt,
    WeeklyReportPrompt,
};
use crate::audit::classifier::{classify, render_basic_report, ClassificationResult};
use crate::audit::tools::{ToolKind, ToolRequest};
use crate::errors::AppError;
use crate::llm_client::prompts::find_forbidden_terms;
use crate::models::form::{parse_optional, parse_required, FormContext, RawCount};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(flatten)]
    pub form: FormContext,
    pub visits_current: Option<RawCount>,
    pub clicks_current: Option<RawCount>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyReportRequest {
    #[serde(flatten)]
    pub form: FormContext,
    pub visits_current: Option<RawCount>,
    pub clicks_current: Option<RawCount>,
    pub visits_previous: Option<RawCount>,
    pub clicks_previous: Option<RawCount>,
    pub applications_count: Option<RawCount>,
    pub recent_changes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToolRunRequest {
    #[serde(flatten)]
    pub form: FormContext,
    #[serde(flatten)]
    pub tool: ToolRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Basic,
    Ai,
    Weekly,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_type: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub tool: ToolKind,
    pub output: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/basic
///
/// Classifies this week's numbers and renders the report locally. No credential needed.
pub async fn handle_basic_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let _guard = state.inflight.acquire(&request.form.client_name)?;

    let visits = parse_required(request.visits_current.as_ref(), "visits_current")?;
    let clicks = parse_required(request.clicks_current.as_ref(), "clicks_current")?;

    let classification = classify(visits, clicks, request.form.source_channel);
    info!(
        "Basic report: visits={}, clicks={}, tier={:?}",
        visits, clicks, classification.tier
    );

    Ok(Json(ReportResponse {
        report_type: ReportType::Basic,
        report: render_basic_report(&classification),
        classification: Some(classification),
    }))
}

/// POST /api/v1/reports/ai
///
/// Hands the three-rule audit prompt to the generator and returns its text verbatim.
pub async fn handle_ai_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let _guard = state.inflight.acquire(&request.form.client_name)?;

    let prompt = assemble_prompt(&PromptRequest::BasicAudit(BasicAuditPrompt {
        industry: request.form.industry,
        source: request.form.source_channel,
        visits: parse_required(request.visits_current.as_ref(), "visits_current")?,
        clicks: parse_required(request.clicks_current.as_ref(), "clicks_current")?,
    }))?;

    let report = run_generation(&state, &headers, prompt).await?;

    Ok(Json(ReportResponse {
        report_type: ReportType::Ai,
        classification: None,
        report,
    }))
}

/// POST /api/v1/reports/weekly
///
/// Week-over-week report. All four current/previous counts are required;
/// deltas and the success threshold are computed here, not by the generator.
pub async fn handle_weekly_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<WeeklyReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let _guard = state.inflight.acquire(&request.form.client_name)?;

    let prompt = assemble_prompt(&PromptRequest::WeeklyReport(WeeklyReportPrompt {
        industry: request.form.industry,
        source: request.form.source_channel,
        visits_current: parse_optional(request.visits_current.as_ref(), "visits_current")?,
        clicks_current: parse_optional(request.clicks_current.as_ref(), "clicks_current")?,
        visits_previous: parse_optional(request.visits_previous.as_ref(), "visits_previous")?,
        clicks_previous: parse_optional(request.clicks_previous.as_ref(), "clicks_previous")?,
        applications: parse_optional(request.applications_count.as_ref(), "applications_count")?,
        recent_changes: request.recent_changes,
    }))?;

    let report = run_generation(&state, &headers, prompt).await?;

    Ok(Json(ReportResponse {
        report_type: ReportType::Weekly,
        classification: None,
        report,
    }))
}

/// POST /api/v1/tools
///
/// Runs one rescue tool. The tool's required field is checked before any call goes out.
pub async fn handle_run_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ToolRunRequest>,
) -> Result<Json<ToolResponse>, AppError> {
    let _guard = state.inflight.acquire(&request.form.client_name)?;

    let tool = request.tool.kind();
    let prompt = assemble_prompt(&PromptRequest::Tool(ToolPrompt {
        industry: request.form.industry,
        source: request.form.source_channel,
        request: request.tool,
    }))?;

    let output = run_generation(&state, &headers, prompt).await?;

    Ok(Json(ToolResponse { tool, output }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// The caller's Gemini key from `Authorization: Bearer <key>`; empty when absent.
/// The scheme name is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .unwrap_or("")
}

/// One generation call. Returned text is passed through unchanged; forbidden
/// terms in it are only logged.
async fn run_generation(
    state: &AppState,
    headers: &HeaderMap,
    prompt: PromptBundle,
) -> Result<String, AppError> {
    let text = state
        .generator
        .generate(bearer_token(headers), prompt)
        .await?;

    let flagged = find_forbidden_terms(&text);
    if !flagged.is_empty() {
        warn!("Generated text contains forbidden terms: {:?}", flagged);
    }

    Ok(text)
}
