// Structured fan-out: one task per unit of work, optional admission gate,
// every task joined before the pass returns.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use super::CollectReport;
use crate::error::CollectError;

/// Handle for reporting soft (item- or family-level) failures without failing the task.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    kind: &'static str,
    tx: mpsc::UnboundedSender<CollectError>,
}

impl ErrorReporter {
    /// Logs `e` once and records it in the pass report.
    pub fn report(&self, e: CollectError) {
        tracing::warn!(collector = self.kind, error = %e, "skipping after soft failure");
        let _ = self.tx.send(e);
    }
}

pub struct FanOut {
    kind: &'static str,
    tasks: JoinSet<Result<(), CollectError>>,
    gate: Option<Arc<Semaphore>>,
    reporter: ErrorReporter,
    errors_rx: mpsc::UnboundedReceiver<CollectError>,
    spawned: usize,
}

impl FanOut {
    /// One task per unit of work, no bound.
    pub fn unbounded(kind: &'static str) -> Self {
        Self::with_gate(kind, None)
    }

    /// At most `limit` tasks in flight; `spawn` waits for a free slot.
    pub fn bounded(kind: &'static str, limit: usize) -> Self {
        Self::with_gate(kind, Some(Arc::new(Semaphore::new(limit.max(1)))))
    }

    fn with_gate(kind: &'static str, gate: Option<Arc<Semaphore>>) -> Self {
        let (tx, errors_rx) = mpsc::unbounded_channel();
        Self {
            kind,
            tasks: JoinSet::new(),
            gate,
            reporter: ErrorReporter { kind, tx },
            errors_rx,
            spawned: 0,
        }
    }

    pub fn reporter(&self) -> ErrorReporter {
        self.reporter.clone()
    }

    /// Spawns `work`. With a gate, blocks until a slot frees up (backpressure).
    pub async fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = Result<(), CollectError>> + Send + 'static,
    {
        let permit = match &self.gate {
            Some(gate) => gate.clone().acquire_owned().await.ok(),
            None => None,
        };
        self.spawned += 1;
        self.tasks.spawn(async move {
            let _permit = permit;
            work.await
        });
    }

    /// Waits for every task. Task errors are reported; panics are logged and counted as lost work.
    pub async fn join(mut self) -> CollectReport {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => self.reporter.report(e),
                Err(e) if e.is_panic() => {
                    tracing::error!(collector = self.kind, error = %e, "fan-out task panicked");
                }
                Err(e) => {
                    tracing::debug!(collector = self.kind, error = %e, "fan-out task cancelled");
                }
            }
        }
        let mut errors = Vec::new();
        while let Ok(e) = self.errors_rx.try_recv() {
            errors.push(e);
        }
        CollectReport {
            tasks: self.spawned,
            errors,
        }
    }
}
