use actix_web::{get, web, HttpResponse};
use tracing::warn;

use super::LocatorState;

const SERVICE_NAME: &str = "locator-service";

/// GET /health - liveness probe
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// GET /ready - readiness probe, checks the inventory store
#[get("/ready")]
pub async fn readiness_check(state: web::Data<LocatorState>) -> HttpResponse {
    match state.inventory.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "service": SERVICE_NAME
        })),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unavailable",
                "service": SERVICE_NAME
            }))
        }
    }
}
