use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::AppState;

/// Generate an itinerary from a JSON trip request.
///
/// The raw body goes straight to the validator; decode failures share the
/// `{success, error}` envelope with every other failure.
///
/// # Response Format
/// - `200 {"success": true, "data": {...}}`
/// - `500 {"success": false, "error": "...", "code": "..."}`
pub async fn generate_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    match state.planner().generate_from_json(&body).await {
        Ok(result) => {
            info!(
                target: "travel_planner::api",
                cities = result.cities.len(),
                "itinerary generated"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": result,
                })),
            )
        }
        Err(err) => {
            warn!(
                target: "travel_planner::api",
                code = err.error_code(),
                "itinerary request failed: {}",
                err
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err.to_error_payload()))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
