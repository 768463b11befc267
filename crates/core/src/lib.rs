//! Response envelope shapes and message formats shared by HTTP handlers.
//!
//! Nothing in this crate performs I/O. The `respkit-api` crate pairs these
//! types with a response sink and a logger.

pub mod envelope;
pub mod messages;
