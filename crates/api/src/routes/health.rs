use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::sink::BufferedResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
///
/// Answers 200 when the database is reachable and 503 otherwise; both carry
/// a success envelope so probes can read the payload either way.
async fn health_check(State(state): State<AppState>) -> BufferedResponse {
    let db_healthy = respkit_db::health_check(&state.pool).await.is_ok();

    let (status, code, message) = if db_healthy {
        ("ok", StatusCode::OK, "service healthy")
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE, "database unreachable")
    };

    let mut w = BufferedResponse::new();
    state.responder.success(
        &HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        },
        message,
        code,
        &mut w,
    );
    w
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
