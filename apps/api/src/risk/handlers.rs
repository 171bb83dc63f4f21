//! Axum route handler for the risk-assessment endpoint.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::risk::service::assess_risk;
use crate::state::AppState;

/// POST /risk-assessment
///
/// Accepts an arbitrary JSON object of business fields and returns
/// `{"success": true, "data": {...}}`. Pipeline-level failures still produce
/// a complete, degraded assessment rather than an error.
pub async fn handle_assess(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    if !body.is_object() {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    }

    let assessment = assess_risk(state.llm.as_ref(), state.assistant.as_deref(), &body).await;

    Ok(Json(json!({ "success": true, "data": assessment })))
}
