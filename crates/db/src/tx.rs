//! Transaction rollback bounded by a caller-supplied cancellation scope.
//!
//! [`Rollback`] abstracts over anything that can be rolled back, so response
//! helpers can be exercised without a live database. [`TxContext`] carries the
//! request's deadline and cancellation token; [`rollback_within`] honours both.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A transaction handle that can be rolled back exactly once.
#[async_trait]
pub trait Rollback: Send + Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Abort the transaction, discarding its pending writes.
    async fn rollback(self) -> Result<(), Self::Error>;
}

#[async_trait]
impl<'c> Rollback for sqlx::Transaction<'c, sqlx::Postgres> {
    type Error = sqlx::Error;

    async fn rollback(self) -> Result<(), sqlx::Error> {
        sqlx::Transaction::rollback(self).await
    }
}

/// Why a rollback did not complete.
#[derive(Debug, thiserror::Error)]
pub enum RollbackError<E: std::error::Error + 'static> {
    /// The handle itself reported a failure.
    #[error(transparent)]
    Failed(E),

    #[error("context canceled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation scope a rollback runs under.
///
/// The default (see [`TxContext::background`]) has no deadline and cannot be
/// cancelled.
#[derive(Debug, Clone, Default)]
pub struct TxContext {
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl TxContext {
    /// A context with no deadline and no cancellation.
    pub fn background() -> Self {
        Self::default()
    }

    /// Give up on the rollback once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Give up on the rollback as soon as `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Roll back `tx`, bounded by the deadline and cancellation token in `ctx`.
///
/// A context that is already cancelled fails without touching the handle.
pub async fn rollback_within<T: Rollback>(
    tx: T,
    ctx: &TxContext,
) -> Result<(), RollbackError<T::Error>> {
    if ctx.is_cancelled() {
        tracing::warn!("Rollback skipped, context already cancelled");
        return Err(RollbackError::Cancelled);
    }

    let rollback = async { tx.rollback().await.map_err(RollbackError::Failed) };

    let bounded = async {
        match ctx.timeout {
            Some(limit) => tokio::time::timeout(limit, rollback)
                .await
                .unwrap_or(Err(RollbackError::DeadlineExceeded)),
            None => rollback.await,
        }
    };

    let result = match &ctx.cancel {
        Some(token) => {
            tokio::select! {
                _ = token.cancelled() => Err(RollbackError::Cancelled),
                result = bounded => result,
            }
        }
        None => bounded.await,
    };

    if let Err(e) = &result {
        tracing::warn!(error = %e, "Rollback did not complete");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    enum FakeTx {
        Ok,
        Failing,
        Slow(Duration),
    }

    #[async_trait]
    impl Rollback for FakeTx {
        type Error = ConnectionReset;

        async fn rollback(self) -> Result<(), ConnectionReset> {
            match self {
                FakeTx::Ok => Ok(()),
                FakeTx::Failing => Err(ConnectionReset),
                FakeTx::Slow(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(())
                }
            }
        }
    }

    #[tokio::test]
    async fn background_context_runs_rollback() {
        assert_matches!(
            rollback_within(FakeTx::Ok, &TxContext::background()).await,
            Ok(())
        );
    }

    #[tokio::test]
    async fn handle_failure_is_reported_with_its_text() {
        let err = rollback_within(FakeTx::Failing, &TxContext::background())
            .await
            .unwrap_err();
        assert_matches!(err, RollbackError::Failed(ConnectionReset));
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_rollback_hits_deadline() {
        let ctx = TxContext::background().with_timeout(Duration::from_millis(50));
        let err = rollback_within(FakeTx::Slow(Duration::from_secs(5)), &ctx)
            .await
            .unwrap_err();
        assert_matches!(err, RollbackError::DeadlineExceeded);
        assert_eq!(err.to_string(), "context deadline exceeded");
    }

    #[tokio::test(start_paused = true)]
    async fn rollback_within_deadline_succeeds() {
        let ctx = TxContext::background().with_timeout(Duration::from_secs(5));
        assert_matches!(
            rollback_within(FakeTx::Slow(Duration::from_millis(10)), &ctx).await,
            Ok(())
        );
    }

    #[tokio::test]
    async fn cancelled_context_skips_rollback() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = TxContext::background().with_cancellation(token);
        assert!(ctx.is_cancelled());

        let err = rollback_within(FakeTx::Ok, &ctx).await.unwrap_err();
        assert_matches!(err, RollbackError::Cancelled);
        assert_eq!(err.to_string(), "context canceled");
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_pending_rollback() {
        let token = CancellationToken::new();
        let ctx = TxContext::background().with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = rollback_within(FakeTx::Slow(Duration::from_secs(60)), &ctx)
            .await
            .unwrap_err();
        assert_matches!(err, RollbackError::Cancelled);
        canceller.await.unwrap();
    }
}
