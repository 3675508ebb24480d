use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::MeasurementRecord;
use crate::startup::AppState;

/// Analyze a water-quality measurement record.
///
/// POST /api/analyze
///
/// Validation failures (empty body, missing required fields) return 400 and
/// never reach the model. Once validation passes the response is always a
/// 200 success envelope: model and parse failures are degraded into
/// error-shaped analysis bodies by the pipeline, so callers must inspect
/// the analysis itself, not just the HTTP status.
pub async fn analyze_water(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    // A body that is not JSON at all is an unexpected failure, not a
    // validation one; only an explicit JSON null counts as "no data".
    let data: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid JSON body: {}", e)))?;

    if data.is_null() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }

    let record: MeasurementRecord = serde_json::from_value(data)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Invalid request shape: {}", e)))?;

    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let analysis = state.analyzer.analyze(&record).await;

    Ok(Json(json!({
        "status": "success",
        "analysis": analysis
    })))
}
