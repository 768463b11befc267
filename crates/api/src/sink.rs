//! The response sink the helpers in [`crate::respond`] write into.
//!
//! Handlers create a [`BufferedResponse`], pass it to a helper, and return it;
//! it implements [`IntoResponse`] so Axum sends whatever was written.

use std::io;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Something that accepts headers, a status line, and a body.
pub trait ResponseSink {
    /// Set (or replace) a response header.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write the status line. Only the first call takes effect.
    fn write_status(&mut self, status: StatusCode);

    /// Append bytes to the body.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;

    /// Fallback used when the JSON envelope could not be produced or sent.
    fn write_plain_error(&mut self, message: &str, status: StatusCode);
}

/// In-memory [`ResponseSink`] that converts into an Axum [`Response`].
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// `true` when nothing at all has been written.
    pub fn is_untouched(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_empty()
    }
}

impl ResponseSink for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(existing) => {
                tracing::warn!(%existing, attempted = %status, "Superfluous status write ignored");
            }
            None => self.status = Some(status),
        }
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(body);
        Ok(())
    }

    fn write_plain_error(&mut self, message: &str, status: StatusCode) {
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.headers
            .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        self.write_status(status);
        self.body.clear();
        self.body.extend_from_slice(message.as_bytes());
        self.body.push(b'\n');
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
