use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use atelier_provider::{InsightRequest, InsightResult};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub result: InsightResult,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, ApiError> {
    if !state.generator.is_available() {
        return Err(ApiError::Unavailable(
            "Insight generation is not configured".to_string(),
        ));
    }
    if request.data.is_null() || request.data == Value::Object(Default::default()) {
        return Err(ApiError::BadRequest("Missing insight data".to_string()));
    }

    let result = state
        .generator
        .generate(request.kind, &request.data)
        .await
        .map_err(|err| {
            warn!(%err, "insight generation failed");
            ApiError::Upstream(err)
        })?;

    Ok(Json(InsightResponse { result }))
}
