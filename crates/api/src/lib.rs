//! JSON envelope helpers for Axum handlers, plus a small demo server.
//!
//! Exposes the building blocks (sink, logger, responder, config, state,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod config;
pub mod log;
pub mod respond;
pub mod router;
pub mod routes;
pub mod sink;
pub mod state;

pub use log::{NoopLog, ResponseLog, TracingLog};
pub use respond::Responder;
pub use sink::{BufferedResponse, ResponseSink};
