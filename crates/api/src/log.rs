//! Logging capability injected into [`crate::respond::Responder`].

/// Receives one event per response written by the helpers.
pub trait ResponseLog: Send + Sync {
    /// A success envelope is about to be written; `data` is the payload as
    /// encoded JSON text.
    fn info(&self, event: &str, data: &str);

    /// An error envelope (or the plain-text fallback) is about to be written.
    fn error(&self, message: &str, error: Option<&str>);
}

impl<L: ResponseLog + ?Sized> ResponseLog for &L {
    fn info(&self, event: &str, data: &str) {
        (**self).info(event, data);
    }

    fn error(&self, message: &str, error: Option<&str>) {
        (**self).error(message, error);
    }
}

/// Emits `tracing` events. The default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ResponseLog for TracingLog {
    fn info(&self, event: &str, data: &str) {
        tracing::info!(event, data, "Response sent");
    }

    fn error(&self, message: &str, error: Option<&str>) {
        tracing::error!(reason = message, error = ?error, "Error response sent");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl ResponseLog for NoopLog {
    fn info(&self, _event: &str, _data: &str) {}

    fn error(&self, _message: &str, _error: Option<&str>) {}
}
