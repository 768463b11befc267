//! JSON envelope helpers for HTTP handlers.
//!
//! Every helper is terminal: it writes the `Content-Type`, the status line and
//! the envelope body into a [`ResponseSink`] in one go. [`Responder::error_bool`],
//! [`Responder::check`] and [`Responder::error_bool_tx`] are guard clauses:
//! they tell the handler whether a response has already been written, and
//! write nothing when there was no error.
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> BufferedResponse {
//!     let mut w = BufferedResponse::new();
//!     let rows = load_rows(&state.pool).await;
//!     if state.responder.error_bool(rows.as_ref().err(), "load rows", StatusCode::INTERNAL_SERVER_ERROR, &mut w) {
//!         return w;
//!     }
//!     state.responder.success(&rows.ok(), "rows loaded", StatusCode::OK, &mut w);
//!     w
//! }
//! ```

use std::fmt::Display;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use respkit_core::envelope::{render_error, ErrorEnvelope, SuccessEnvelope, CONTENT_TYPE_JSON};
use respkit_core::messages;
use respkit_db::{rollback_within, Rollback, TxContext};
use serde::Serialize;

use crate::log::{ResponseLog, TracingLog};
use crate::sink::ResponseSink;

/// Writes success and error envelopes, reporting each one to a [`ResponseLog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder<L = TracingLog> {
    log: L,
}

impl Responder {
    /// A responder that logs through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: ResponseLog> Responder<L> {
    pub fn with_log(log: L) -> Self {
        Self { log }
    }

    /// Write `data` in a success envelope with the given status.
    ///
    /// The status is not validated; non-2xx values are written as given.
    pub fn success<T, S>(&self, data: &T, message: &str, status: StatusCode, sink: &mut S)
    where
        T: Serialize + ?Sized,
        S: ResponseSink + ?Sized,
    {
        self.write_success(messages::EVENT_SUCCESS, data, message, status, sink);
    }

    /// Write `data` in a success envelope with status 201 Created.
    pub fn success_create_or_update<T, S>(&self, data: &T, message: &str, sink: &mut S)
    where
        T: Serialize + ?Sized,
        S: ResponseSink + ?Sized,
    {
        self.write_success(
            messages::EVENT_CREATE_OR_UPDATE,
            data,
            message,
            StatusCode::CREATED,
            sink,
        );
    }

    /// Write a 401 error envelope carrying `err` as the reason.
    pub fn unauthorized<E, S>(&self, sink: &mut S, err: &E)
    where
        E: Display + ?Sized,
        S: ResponseSink + ?Sized,
    {
        self.error(
            Some(err),
            messages::UNAUTHORIZED,
            StatusCode::UNAUTHORIZED,
            sink,
        );
    }

    /// Write an error envelope. A missing `err` serializes as `null`.
    pub fn error<E, S>(&self, err: Option<&E>, message: &str, status: StatusCode, sink: &mut S)
    where
        E: Display + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let rendered = render_error(err);
        self.log.error(message, rendered.as_deref());
        let envelope = ErrorEnvelope::new(message, rendered, status.as_u16());
        self.write_envelope(&envelope, status, sink);
    }

    /// Guard clause: on `Some(err)` write `"<err_name>: <err>"` with `status`
    /// and return `true`; on `None` write nothing and return `false`.
    pub fn error_bool<E, S>(
        &self,
        err: Option<&E>,
        err_name: &str,
        status: StatusCode,
        sink: &mut S,
    ) -> bool
    where
        E: Display + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let Some(err) = err else {
            return false;
        };
        self.error(Some(err), &messages::step_failed(err_name, err), status, sink);
        true
    }

    /// [`Self::error_bool`] for a `Result`: hands back the success value, or
    /// writes the error and returns `None`.
    pub fn check<T, E, S>(
        &self,
        result: Result<T, E>,
        err_name: &str,
        status: StatusCode,
        sink: &mut S,
    ) -> Option<T>
    where
        E: Display,
        S: ResponseSink + ?Sized,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.error_bool(Some(&err), err_name, status, sink);
                None
            }
        }
    }

    /// Roll back `tx` and write a 500 error envelope.
    ///
    /// There is no error argument: calling this means the operation named
    /// `err_name` already failed. The envelope reports either the rollback
    /// failure or that the rollback went through.
    pub async fn error_tx<T, S>(&self, tx: T, ctx: &TxContext, err_name: &str, sink: &mut S)
    where
        T: Rollback,
        S: ResponseSink + ?Sized,
    {
        match rollback_within(tx, ctx).await {
            Err(rollback_err) => self.error(
                Some(&rollback_err),
                &messages::rollback_failed(&rollback_err, err_name),
                StatusCode::INTERNAL_SERVER_ERROR,
                sink,
            ),
            Ok(()) => self.error(
                None::<&str>,
                &messages::rolled_back(err_name),
                StatusCode::INTERNAL_SERVER_ERROR,
                sink,
            ),
        }
    }

    /// Guard clause with rollback: on `Some(err)` roll back `tx`, write a 500
    /// error envelope and return `None`. On no error nothing is written and the
    /// transaction is handed back so the handler can keep using it.
    ///
    /// ```ignore
    /// let Some(tx) = responder.error_bool_tx(tx, &ctx, res.as_ref().err(), "insert", &mut w).await else {
    ///     return w;
    /// };
    /// ```
    pub async fn error_bool_tx<T, E, S>(
        &self,
        tx: T,
        ctx: &TxContext,
        err: Option<&E>,
        err_name: &str,
        sink: &mut S,
    ) -> Option<T>
    where
        T: Rollback,
        E: Display + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let Some(err) = err else {
            return Some(tx);
        };

        match rollback_within(tx, ctx).await {
            Err(rollback_err) => self.error(
                Some(&rollback_err),
                &messages::step_rollback_failed(&rollback_err, err_name),
                StatusCode::INTERNAL_SERVER_ERROR,
                sink,
            ),
            Ok(()) => self.error(
                Some(err),
                &messages::step_rolled_back(err_name, err),
                StatusCode::INTERNAL_SERVER_ERROR,
                sink,
            ),
        }
        None
    }

    fn write_success<T, S>(
        &self,
        event: &str,
        data: &T,
        message: &str,
        status: StatusCode,
        sink: &mut S,
    ) where
        T: Serialize + ?Sized,
        S: ResponseSink + ?Sized,
    {
        let payload = match serde_json::to_string(data) {
            Ok(payload) => payload,
            Err(e) => return self.encode_failed(&e, sink),
        };
        self.log.info(event, &payload);
        let envelope = SuccessEnvelope::new(data, message, status.as_u16());
        self.write_envelope(&envelope, status, sink);
    }

    /// Serialize before touching the sink so an encoding failure can still
    /// produce a clean 500.
    fn write_envelope<B, S>(&self, envelope: &B, status: StatusCode, sink: &mut S)
    where
        B: Serialize,
        S: ResponseSink + ?Sized,
    {
        let body = match serde_json::to_vec(envelope) {
            Ok(body) => body,
            Err(e) => return self.encode_failed(&e, sink),
        };
        sink.set_header(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        sink.write_status(status);
        if let Err(e) = sink.write_body(&body) {
            self.encode_failed(&e, sink);
        }
    }

    fn encode_failed<S>(&self, err: &dyn Display, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        let message = messages::encode_failed(err);
        self.log.error(&message, None);
        sink.write_plain_error(&message, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
