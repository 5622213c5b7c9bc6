pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::audit::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Reports
        .route("/api/v1/reports/basic", post(handlers::handle_basic_report))
        .route("/api/v1/reports/ai", post(handlers::handle_ai_report))
        .route("/api/v1/reports/weekly", post(handlers::handle_weekly_report))
        // Rescue tools
        .route("/api/v1/tools", post(handlers::handle_run_tool))
        .with_state(state)
}
