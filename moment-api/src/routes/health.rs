use axum::Json;
use moment_shared::types::api::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("moment-api", env!("CARGO_PKG_VERSION")))
}
