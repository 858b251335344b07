//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Raga Wellness API",
        version = "0.1.0",
        description = "Raga recommendations from self-reported stress and energy, with session history analytics.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Recommendation", description = "Raga recommendation and catalog endpoints"),
        (name = "Analytics", description = "Session history summaries"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Recommendation
        crate::rest::handle_recommend,
        crate::rest::handle_catalog,
        // Analytics
        crate::analytics_rest::handle_analytics,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Domain types
        raga_core::Gender,
        raga_core::Feedback,
        raga_core::Assessment,
        raga_core::HistoryEntry,
        raga_rl_engine::RagaCluster,
        raga_rl_engine::RecommendationResult,
        // Analytics types
        raga_analytics::AnalyticsReport,
        raga_analytics::report::WellnessBand,
        raga_analytics::report::ClusterShare,
        raga_analytics::report::RagaFeedbackSummary,
        raga_analytics::report::TrendPoint,
        crate::analytics_rest::AnalyticsRequest,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
