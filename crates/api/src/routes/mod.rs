pub mod demo;
pub mod health;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use crate::respond::Responder;
use crate::sink::BufferedResponse;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST /echo      echo a JSON body back with 201
/// GET  /whoami    bearer-token protected identity check
/// POST /probe     run a query inside a transaction, rolling back on failure
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/echo", post(demo::echo))
        .route("/whoami", get(demo::whoami))
        .route("/probe", post(demo::probe))
}

/// Fallback for unknown routes, answered with an error envelope.
pub async fn not_found() -> BufferedResponse {
    let mut w = BufferedResponse::new();
    Responder::new().error(
        None::<&str>,
        "route not found",
        StatusCode::NOT_FOUND,
        &mut w,
    );
    w
}
