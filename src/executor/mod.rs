//! Bounded Worker Pools
//!
//! The ingestion pipeline is three pools chained by bounded queues:
//! fetcher → tokenizer → poster. Each pool is a [`executor::TaskExecutor`] with a
//! fixed number of workers draining one [`types::JobQueue`].
//!
//! ## Submodules
//! - **`types`**: the bounded queue halves and pool counters.
//! - **`executor`**: worker lifecycle (wait → run handler → log failure → repeat).

pub mod executor;
pub mod types;
