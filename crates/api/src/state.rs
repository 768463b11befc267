use std::sync::Arc;

use crate::config::ServerConfig;
use crate::respond::Responder;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: respkit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Envelope writer shared by every handler.
    pub responder: Responder,
}
