//! Health check handlers.

use axum::Json;
use axum::extract::State;

use cardhub_core::types::response::Envelope;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<Envelope<HealthResponse>> {
    Json(Envelope::ok(
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        "OK",
    ))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<Envelope<DetailedHealthResponse>> {
    let database = match state.db.health_check().await {
        Ok(true) => "connected",
        _ => "unavailable",
    };

    Json(Envelope::ok(
        DetailedHealthResponse {
            status: if database == "connected" {
                "ok".to_string()
            } else {
                "degraded".to_string()
            },
            database: database.to_string(),
            render_gate_idle: state.render_gate.is_idle(),
        },
        "OK",
    ))
}
