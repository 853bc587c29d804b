//! Command-line and environment configuration for both services.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::routing::ShardEndpoints;

/// Distributed full-text search: run the ingestion/query front-end or an index shard.
#[derive(Debug, Parser)]
#[command(name = "distributed_search", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Accept documents and queries, fan tokens and terms out to the shards.
    Frontend(FrontendConfig),
    /// Hold one slice of the inverted index.
    Shard(ShardConfig),
}

#[derive(Debug, Clone, Args)]
pub struct FrontendConfig {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the shard owning tokens that start with 'a'..='m'.
    #[arg(long = "shard-a-m", env = "LIB_A_M", default_value = "")]
    pub shard_a_m: String,

    /// Base URL of the shard owning tokens that start with 'n'..='z'.
    #[arg(long = "shard-n-z", env = "LIB_N_Z", default_value = "")]
    pub shard_n_z: String,

    /// Base URL of the shard owning every other token.
    #[arg(long = "shard-other", env = "LIB_OTHERS", default_value = "")]
    pub shard_other: String,

    /// Timeout for outbound fetch, index and query calls. 0 disables it.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[command(flatten)]
    pub pipeline: PipelineConfig,
}

impl FrontendConfig {
    pub fn endpoints(&self) -> ShardEndpoints {
        ShardEndpoints::new(&self.shard_a_m, &self.shard_n_z, &self.shard_other)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ShardConfig {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:9090")]
    pub bind: SocketAddr,

    /// Label used in logs, e.g. "a-m".
    #[arg(long, env = "SHARD_NAME", default_value = "shard")]
    pub name: String,

    /// Capacity of the token catalog's inbound queue.
    #[arg(long, env = "CATALOG_QUEUE_CAPACITY", default_value = "100")]
    pub queue_capacity: NonZeroUsize,
}

/// Pool size and queue capacity shared by the fetcher, tokenizer and poster pools.
#[derive(Debug, Clone, Copy, Args)]
pub struct PipelineConfig {
    #[arg(long, env = "WORKERS", default_value = "4")]
    pub workers: NonZeroUsize,

    #[arg(long, env = "QUEUE_CAPACITY", default_value = "8")]
    pub queue_capacity: NonZeroUsize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN),
            queue_capacity: NonZeroUsize::new(8).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Builds the client used for every outbound call of the front-end.
pub fn build_http_client(timeout: Option<Duration>) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
