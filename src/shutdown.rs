//! Process-wide shutdown broadcast.
//!
//! A single [`ShutdownTrigger`] fans a stop signal out to every store actor, worker
//! loop and HTTP server that holds a [`Shutdown`] receiver. Each loop observes the
//! signal at its next `select!`; messages still sitting in a queue at that point
//! are dropped.

use tokio::sync::watch;

/// Sending half. Dropping it also counts as a shutdown.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receiving half, cloned into every long-running loop.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        tracing::info!("Shutdown requested, stopping all loops");
        // send_replace never fails, even with no receivers left.
        self.tx.send_replace(true);
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            rx: self.tx.subscribe(),
        }
    }
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the trigger fired or was dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // wait_for errors only when the sender is gone, which means shutdown too.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelled_resolves_after_trigger() {
        let (trigger, shutdown) = channel();
        assert!(!shutdown.is_triggered());

        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.cancelled().await })
        };

        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after trigger")
            .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_dropping_trigger_counts_as_shutdown() {
        let (trigger, shutdown) = channel();
        drop(trigger);

        tokio::time::timeout(Duration::from_secs(1), shutdown.cancelled())
            .await
            .expect("dropped trigger should release waiters");
    }

    #[tokio::test]
    async fn test_subscribe_sees_earlier_trigger() {
        let (trigger, _shutdown) = channel();
        trigger.trigger();

        let late = trigger.subscribe();
        assert!(late.is_triggered());
    }
}
