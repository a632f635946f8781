use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppState;

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Welcome to the account service")
}

/// GET /health: reports whether the identity store is reachable
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.identity.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
        }
    }
}
