use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Ranker is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Reports 503 when the store cannot be reached.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let backend = state.database.backend_name();
    let database_check = match state.database.ping().await {
        Ok(()) => match state.catalog().count().await {
            Ok(works) => Ok(json!({
                "status": "healthy",
                "backend": backend,
                "works": works
            })),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let status = match database_check {
        Ok(check) => {
            health_status["checks"]["database"] = check;
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "backend": backend,
                "error": e.to_string()
            });
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health_status))
}
