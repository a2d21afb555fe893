//! Bounded task execution with a hard wall-clock deadline.
//!
//! A hang in an external encoder must not block the whole run, so the one
//! long-running conversion step executes through [`run_with_timeout`]: the
//! operation runs on a dedicated worker thread whose real work is driving a
//! child process, and its result crosses back to the caller over a
//! rendezvous channel written at most once. The only other state shared
//! across the boundary is a [`CancelToken`]; when the deadline elapses the
//! caller trips it, the worker kills its child and unwinds, and the caller
//! joins the worker before returning so no zombie survives the call.
//!
//! Cancellation is deadline-expiry only. There is no graceful shutdown
//! handshake and no caching: calling twice re-executes fully.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// How often cancellable operations should check their token.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Cooperative cancellation flag shared between the runner and its worker.
///
/// The token carries no payload; an operation that observes it set must
/// terminate its child process and return promptly.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Outcome of a bounded task that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T> {
    /// The operation finished within the deadline.
    Completed(T),
    /// The deadline elapsed; the operation was terminated.
    TimedOut,
}

/// Runs `op` on a worker thread with a hard deadline.
///
/// * Completion within the deadline returns `Ok(TaskOutcome::Completed(v))`.
/// * An operation error is re-raised to the caller as `Err`.
/// * Deadline expiry trips the cancel token, joins the worker (which kills
///   its child process on the way out), logs a warning, and returns
///   `Ok(TaskOutcome::TimedOut)`. A result the worker produced after
///   cancellation is discarded.
///
/// The worker is always joined before this function returns.
pub fn run_with_timeout<T, F>(label: &str, timeout: Duration, op: F) -> CoreResult<TaskOutcome<T>>
where
    F: FnOnce(CancelToken) -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<CoreResult<T>>(1);
    let token = CancelToken::new();
    let worker_token = token.clone();

    let handle = thread::Builder::new()
        .name(format!("bounded-{label}"))
        .spawn(move || {
            let _ = tx.send(op(worker_token));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            // The worker has already sent; joining cannot block meaningfully.
            let _ = handle.join();
            result.map(TaskOutcome::Completed)
        }
        Err(RecvTimeoutError::Timeout) => {
            token.cancel();
            let _ = handle.join();
            log::warn!(
                "'{label}' did not finish within {}s and was terminated",
                timeout.as_secs()
            );
            Ok(TaskOutcome::TimedOut)
        }
        Err(RecvTimeoutError::Disconnected) => {
            let _ = handle.join();
            Err(CoreError::WorkerFailed(label.to_string()))
        }
    }
}

/// Like [`run_with_timeout`], but maps a timeout to a configured default
/// value instead of surfacing the `TimedOut` outcome.
pub fn run_with_timeout_or<T, F>(
    label: &str,
    timeout: Duration,
    default: T,
    op: F,
) -> CoreResult<T>
where
    F: FnOnce(CancelToken) -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    match run_with_timeout(label, timeout, op)? {
        TaskOutcome::Completed(value) => Ok(value),
        TaskOutcome::TimedOut => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_clear_and_latches() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        let clone = token.clone();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn fast_operation_returns_its_value() {
        let outcome =
            run_with_timeout("fast", Duration::from_secs(5), |_| Ok(42u32)).unwrap();
        assert_eq!(outcome, TaskOutcome::Completed(42));
    }

    #[test]
    fn operation_error_is_reraised() {
        let result: CoreResult<TaskOutcome<u32>> =
            run_with_timeout("failing", Duration::from_secs(5), |_| {
                Err(CoreError::OperationFailed("encoder exploded".to_string()))
            });
        match result {
            Err(CoreError::OperationFailed(msg)) => assert_eq!(msg, "encoder exploded"),
            other => panic!("expected re-raised error, got {other:?}"),
        }
    }
}
