// handlers/system.rs - Service descriptor and health check

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - what this service is and where things live
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Folio API",
        "version": version,
        "environment": state.config.environment.to_string(),
        "endpoints": {
            "projects": "/api/projects[/:id] (GET public, writes admin)",
            "skills": "/api/skills[/:id] (GET public, writes admin)",
            "contact": "/api/contact (POST public, GET/DELETE admin)",
            "register": "/api/register (public)",
            "auth": "/api/auth/login, /api/auth/logout (public), /api/auth/session (admin)",
            "admin": "/admin/dashboard (admin)",
            "health": "/health (public)"
        }
    }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "health check failed");
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
