use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Fixed liveness payload — there is no internal state to report.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "business-intelligence-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().timestamp(),
    }))
}

/// GET /business-analysis/health
pub async fn analysis_health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Business Analysis",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /risk-assessment/health
pub async fn risk_health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Risk Assessment",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
