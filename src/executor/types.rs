use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::error::QueueError;

/// Producer side of a bounded job queue. Cloned into every stage that feeds the pool.
#[derive(Debug)]
pub struct JobQueue<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
}

impl<T> Clone for JobQueue<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> JobQueue<T> {
    /// Enqueues a job, waiting for a free slot when the queue is full.
    pub async fn submit(&self, job: T) -> Result<(), QueueError> {
        self.tx
            .send(job)
            .await
            .map_err(|_| QueueError::Closed(self.name))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Free slots right now.
    pub fn available(&self) -> usize {
        self.tx.capacity()
    }
}

/// Consumer side, shared by every worker of one pool.
///
/// The receiver sits behind a mutex so that exactly one idle worker waits on it at a
/// time; a job is handed to whichever worker wins the lock.
#[derive(Debug)]
pub struct JobReceiver<T> {
    pub(crate) rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for JobReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> JobReceiver<T> {
    /// `None` once every [`JobQueue`] handle is gone and the queue is drained.
    pub async fn next(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }

    /// Refuses further jobs. Pending and future `submit` calls fail with
    /// [`QueueError::Closed`]; jobs already buffered are dropped with the receiver.
    pub async fn close(&self) {
        self.rx.lock().await.close();
    }
}

pub fn job_queue<T>(name: &'static str, capacity: usize) -> (JobQueue<T>, JobReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        JobQueue { name, tx },
        JobReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Counters for one pool, read with [`super::executor::TaskExecutor::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    /// Jobs whose handler returned `Ok`.
    pub succeeded: usize,
    /// Jobs whose handler returned `Err`; the error was logged and the job dropped.
    pub failed: usize,
}

impl ExecutorStats {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}
