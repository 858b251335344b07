//! REST API handlers for recommendations, the catalog and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use raga_core::Assessment;
use raga_rl_engine::{RagaCluster, RecommendationEngine, RecommendationResult};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Highest accepted stress level.
const MAX_STRESS: i32 = 5;

/// Highest accepted energy level.
const MAX_ENERGY: f64 = 100.0;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub node_id: String,
    pub start_time: Instant,
}

/// Validate an assessment at the API boundary. The engine itself accepts any
/// value, so out-of-range input is rejected here.
pub fn validate_assessment(assessment: &Assessment) -> Result<(), &'static str> {
    if !(0..=MAX_STRESS).contains(&assessment.stress_level) {
        return Err("'stressLevel' must be between 0 and 5");
    }
    if !assessment.energy_level.is_finite() {
        return Err("'energyLevel' must be a finite number");
    }
    if !(0.0..=MAX_ENERGY).contains(&assessment.energy_level) {
        return Err("'energyLevel' must be between 0 and 100");
    }
    Ok(())
}

/// POST /v1/recommend: Recommend a raga for a self-assessment.
#[utoipa::path(
    post,
    path = "/v1/recommend",
    tag = "Recommendation",
    request_body = Assessment,
    responses(
        (status = 200, description = "Raga recommended", body = RecommendationResult),
        (status = 400, description = "Assessment out of range", body = ErrorResponse),
    )
)]
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(assessment): Json<Assessment>,
) -> Result<Json<RecommendationResult>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(msg) = validate_assessment(&assessment) {
        warn!(
            stress_level = assessment.stress_level,
            energy_level = assessment.energy_level,
            error = msg,
            "Assessment validation failed"
        );
        metrics::counter!("api.validation_errors").increment(1);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid_assessment".to_string(),
                message: msg.to_string(),
            }),
        ));
    }

    let result = state.engine.recommend_assessment(&assessment);
    metrics::counter!("recommendations.total", "cluster" => result.cluster.to_string())
        .increment(1);
    if result.explored {
        metrics::counter!("recommendations.explored").increment(1);
    }
    debug!(
        node_id = %state.node_id,
        cluster = result.cluster,
        raga = %result.raga,
        "Recommendation served"
    );
    Ok(Json(result))
}

/// GET /v1/catalog: The raga clusters and their ragas.
#[utoipa::path(
    get,
    path = "/v1/catalog",
    tag = "Recommendation",
    responses(
        (status = 200, description = "Raga catalog in cluster order", body = [RagaCluster]),
    )
)]
pub async fn handle_catalog(State(state): State<AppState>) -> Json<&'static [RagaCluster]> {
    Json(state.engine.catalog())
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        epsilon: state.engine.epsilon(),
    })
}

/// GET /ready: Readiness probe. The engine is built before the router, so
/// a running server is always ready.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to serve traffic"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live: Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub epsilon: f64,
}
