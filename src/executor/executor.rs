//! Worker Pool Implementation
//!
//! Spawns a fixed number of workers that all drain the same bounded [`JobReceiver`].
//!
//! ## Responsibilities
//! - **Draining**: each idle worker waits for the next job from the shared queue.
//! - **Execution**: the pool's handler closure runs the job to completion; no timeout
//!   is applied here, so a handler blocked on the network holds its worker.
//! - **Containment**: a failed job is logged and dropped. There is no retry and no
//!   dead-letter queue, and one failure never stops a worker.
//! - **Shutdown**: workers exit as soon as the shutdown signal fires, abandoning the
//!   job in hand, and close the queue so blocked producers are released.

use super::types::*;
use crate::shutdown::Shutdown;

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinHandle;

/// Type-erased asynchronous job handler.
pub type JobHandlerFn<T> =
    Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// A pool of `worker_count` workers running one handler over one queue.
pub struct TaskExecutor<T> {
    /// Pool name, used in logs.
    name: &'static str,
    /// Shared source of jobs.
    receiver: JobReceiver<T>,
    handler: JobHandlerFn<T>,
    worker_count: usize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl<T: Send + 'static> TaskExecutor<T> {
    pub fn new<F, Fut>(
        name: &'static str,
        receiver: JobReceiver<T>,
        worker_count: usize,
        handler: F,
    ) -> Arc<Self>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        // Box::pin erases the concrete future type so any async closure fits.
        let handler: JobHandlerFn<T> = Arc::new(move |job: T| {
            Box::pin(handler(job)) as Pin<Box<dyn Future<Output = Result<()>> + Send>>
        });

        Arc::new(Self {
            name,
            receiver,
            handler,
            worker_count: worker_count.max(1),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        })
    }

    /// Spawns the workers and returns immediately.
    pub fn start(self: Arc<Self>, shutdown: Shutdown) -> Vec<JoinHandle<()>> {
        tracing::info!("Starting {} {} workers", self.worker_count, self.name);

        (0..self.worker_count)
            .map(|worker_id| {
                let executor = self.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    executor.worker_loop(worker_id, shutdown).await;
                })
            })
            .collect()
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn stats(&self) -> ExecutorStats {
        ExecutorStats {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    async fn worker_loop(&self, worker_id: usize, shutdown: Shutdown) {
        tracing::debug!("{} worker {} started", self.name, worker_id);

        loop {
            let job = tokio::select! {
                _ = shutdown.cancelled() => break,
                job = self.receiver.next() => job,
            };

            // All producers are gone and the queue is empty.
            let Some(job) = job else { break };

            let outcome = tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("{} worker {}: job abandoned on shutdown", self.name, worker_id);
                    break;
                }
                outcome = (self.handler)(job) => outcome,
            };

            match outcome {
                Ok(()) => {
                    self.succeeded.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("{} worker {}: job dropped: {:#}", self.name, worker_id, e);
                }
            }
        }

        // Wakes producers still blocked on a full queue; their submit now fails.
        self.receiver.close().await;
        tracing::info!("Exiting {} worker {}", self.name, worker_id);
    }
}
