//! One-shot completion delivery with caller-owned cancellation.
//!
//! A front-end issues an operation, moves on, and later wants its result
//! handed to a callback (or posted to its event loop). If the consumer is
//! gone by then, the result must be dropped instead of delivered. The
//! consumer owns a `CallScope`; releasing it, explicitly or by dropping its
//! guard, turns every pending completion under that scope into a no-op.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use crate::error::TripError;

/// Lifetime of a result consumer, such as a screen.
#[derive(Debug, Clone, Default)]
pub struct CallScope {
    token: CancellationToken,
}

impl CallScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope released together with this one, or on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn release(&self) {
        self.token.cancel();
    }

    pub fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Releases the scope when dropped.
    pub fn guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}

/// Run `operation` on the current tokio runtime and hand its result to
/// `on_complete` exactly once, unless `scope` is released first.
///
/// Must be called from within a tokio runtime.
pub fn dispatch<T, F, C>(scope: &CallScope, operation: F, on_complete: C) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Result<T, TripError>> + Send + 'static,
    C: FnOnce(Result<T, TripError>) + Send + 'static,
{
    let token = scope.token.clone();
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("call scope released; dropping completion");
            }
            result = operation => {
                if token.is_cancelled() {
                    debug!("call scope released; dropping completion");
                } else {
                    on_complete(result);
                }
            }
        }
    })
}

/// Like `dispatch`, but posts the result to a channel drained by the
/// consumer's own loop. A closed receiver counts as a released consumer.
pub fn dispatch_to<T, F>(
    scope: &CallScope,
    operation: F,
    sink: mpsc::UnboundedSender<Result<T, TripError>>,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Result<T, TripError>> + Send + 'static,
{
    dispatch(scope, operation, move |result| {
        if sink.send(result).is_err() {
            debug!("completion receiver closed; dropping completion");
        }
    })
}
