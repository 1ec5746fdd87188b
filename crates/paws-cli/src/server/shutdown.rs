//! Graceful shutdown signal handling.

use std::future::{Future, pending};
use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio::sync::oneshot;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "received Ctrl+C"
            ),
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "failed to install Ctrl+C handler"
                );
                pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(target: TRACING_TARGET_SERVER_SHUTDOWN, "received SIGTERM");
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "failed to install SIGTERM handler"
                );
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Splits `signal` into the graceful shutdown trigger and a deadline that
/// fires `timeout` after the trigger.
///
/// The server drains in-flight requests once the trigger resolves and is
/// dropped when the deadline resolves first.
pub fn with_deadline(
    signal: impl Future<Output = ()> + Send + 'static,
    timeout: Duration,
) -> (
    impl Future<Output = ()> + Send + 'static,
    impl Future<Output = ()> + Send + 'static,
) {
    let (started_tx, started_rx) = oneshot::channel::<()>();

    let trigger = async move {
        signal.await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = timeout.as_secs(),
            "graceful shutdown initiated"
        );
        let _ = started_tx.send(());
    };

    let deadline = async move {
        if started_rx.await.is_err() {
            pending::<()>().await;
        }
        tokio::time::sleep(timeout).await;
        tracing::warn!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = timeout.as_secs(),
            "shutdown timeout elapsed, dropping open connections"
        );
    };

    (trigger, deadline)
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_follows_the_trigger() {
        let (trigger, deadline) = with_deadline(ready(()), Duration::from_secs(5));
        trigger.await;

        let elapsed = tokio::time::timeout(Duration::from_secs(6), deadline).await;
        assert!(elapsed.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_waits_for_the_trigger() {
        let (_trigger, deadline) = with_deadline(pending::<()>(), Duration::from_secs(5));

        let elapsed = tokio::time::timeout(Duration::from_secs(60), deadline).await;
        assert!(elapsed.is_err());
    }
}
