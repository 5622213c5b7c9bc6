use std::sync::Arc;

use crate::inflight::InFlight;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: GeminiClient against the configured base URL.
    pub generator: Arc<dyn TextGenerator>,
    /// Forms with an action currently pending.
    pub inflight: InFlight,
}
