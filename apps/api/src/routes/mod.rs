pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::risk;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Business analysis
        .route("/business-analysis", post(analysis::handlers::handle_analyze))
        .route(
            "/business-analysis/health",
            get(health::analysis_health_handler),
        )
        // Risk assessment
        .route("/risk-assessment", post(risk::handlers::handle_assess))
        .route("/risk-assessment/health", get(health::risk_health_handler))
        .with_state(state)
}
