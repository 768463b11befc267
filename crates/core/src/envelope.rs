//! The two response envelopes every handler answers with.
//!
//! Both serialize to a JSON object with exactly four keys, in this order:
//! `data`, `message`, `statusCode`, `success`.

use std::fmt::Display;

use serde::Serialize;

/// `Content-Type` value written alongside every envelope.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Top-level keys of a serialized envelope.
pub const ENVELOPE_KEYS: [&str; 4] = ["data", "message", "statusCode", "success"];

/// Envelope for a successful response. `success` is always `true`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<'a, T: ?Sized> {
    pub data: &'a T,
    pub message: &'a str,
    pub status_code: u16,
    pub success: bool,
}

impl<'a, T: Serialize + ?Sized> SuccessEnvelope<'a, T> {
    pub fn new(data: &'a T, message: &'a str, status_code: u16) -> Self {
        Self {
            data,
            message,
            status_code,
            success: true,
        }
    }
}

/// Envelope for a failed response. `data` is always null and `success` is
/// always `false`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope<'a> {
    pub data: (),
    pub message: ErrorDetail<'a>,
    pub status_code: u16,
    pub success: bool,
}

/// The nested `message` object of an [`ErrorEnvelope`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail<'a> {
    pub error_message: &'a str,
    /// Rendered error text, or `null` when no error value was supplied.
    pub error: Option<String>,
}

impl<'a> ErrorEnvelope<'a> {
    pub fn new(error_message: &'a str, error: Option<String>, status_code: u16) -> Self {
        Self {
            data: (),
            message: ErrorDetail {
                error_message,
                error,
            },
            status_code,
            success: false,
        }
    }
}

/// Render an optional error value for the `error` field.
///
/// Errors are written as their display text. Serializing arbitrary error
/// structs would expose internals or collapse to `{}` for opaque types.
pub fn render_error<E: Display + ?Sized>(err: Option<&E>) -> Option<String> {
    err.map(|e| e.to_string())
}
