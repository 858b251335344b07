//! History analytics REST endpoint.

use crate::rest::ErrorResponse;
use axum::http::StatusCode;
use axum::Json;
use raga_analytics::{validate_history, AnalyticsReport};
use raga_core::HistoryEntry;
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;

/// Maximum number of history entries per analytics request.
const MAX_HISTORY_ENTRIES: usize = 10_000;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyticsRequest {
    pub history: Vec<HistoryEntry>,
}

fn validate_request(history: &[HistoryEntry]) -> Result<(), String> {
    if history.len() > MAX_HISTORY_ENTRIES {
        return Err(format!("history exceeds maximum of {MAX_HISTORY_ENTRIES} entries"));
    }
    validate_history(history).map_err(|e| e.to_string())
}

/// POST /v1/analytics: Summarise a session history.
#[utoipa::path(
    post,
    path = "/v1/analytics",
    tag = "Analytics",
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsReport),
        (status = 400, description = "History rejected", body = ErrorResponse),
    )
)]
pub async fn handle_analytics(
    Json(request): Json<AnalyticsRequest>,
) -> Result<Json<AnalyticsReport>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(message) = validate_request(&request.history) {
        warn!(error = %message, "Analytics request validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid_history".to_string(),
                message,
            }),
        ));
    }

    metrics::counter!("analytics.reports").increment(1);
    Ok(Json(AnalyticsReport::build(&request.history)))
}
