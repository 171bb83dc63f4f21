//! Axum route handler for the business-analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::analysis::service::generate_analysis;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /business-analysis
///
/// Accepts an arbitrary JSON object of business fields (canonical and legacy
/// key names) and returns `{"success": true, "data": {...}}`. Pipeline-level
/// failures still produce a complete, degraded analysis rather than an error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    if !body.is_object() {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    }

    let analysis = generate_analysis(state.llm.as_ref(), &body).await;

    Ok(Json(json!({ "success": true, "data": analysis })))
}
