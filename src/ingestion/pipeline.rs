//! Ingestion pipeline wiring.
//!
//! ```text
//! /feeder ──► [fetcher queue] ─► fetchers ─► DocumentStore
//!                                   │
//!                                   ▼
//!                          [tokenizer queue] ─► tokenizers ─► LineStore
//!                                                   │
//!                                                   ▼
//!                                           [poster queue] ─► posters ─► shard /index
//! ```
//!
//! Every queue is bounded and every pool has the same fixed size.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::fetcher::DocumentFetcher;
use super::poster::IndexPoster;
use super::tokenizer::DocumentTokenizer;
use super::types::IngestionRequest;
use crate::config::PipelineConfig;
use crate::executor::executor::TaskExecutor;
use crate::executor::types::{ExecutorStats, JobQueue, job_queue};
use crate::index::protocol::TokenOccurrence;
use crate::routing::ShardRouter;
use crate::shutdown::Shutdown;
use crate::storage::documents::DocumentStore;
use crate::storage::lines::LineStore;
use crate::storage::types::Document;

/// Per-stage counters of handled jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub fetched: ExecutorStats,
    pub tokenized: ExecutorStats,
    pub posted: ExecutorStats,
}

pub struct IngestionPipeline {
    requests: JobQueue<IngestionRequest>,
    fetchers: Arc<TaskExecutor<IngestionRequest>>,
    tokenizers: Arc<TaskExecutor<Document>>,
    posters: Arc<TaskExecutor<TokenOccurrence>>,
    handles: Vec<JoinHandle<()>>,
}

impl IngestionPipeline {
    pub fn start(
        config: PipelineConfig,
        client: reqwest::Client,
        router: ShardRouter,
        documents: DocumentStore,
        lines: LineStore,
        shutdown: Shutdown,
    ) -> Self {
        let workers = config.workers.get();
        let capacity = config.queue_capacity.get();

        let (requests, request_rx) = job_queue::<IngestionRequest>("fetcher", capacity);
        let (doc_tx, doc_rx) = job_queue::<Document>("tokenizer", capacity);
        let (token_tx, token_rx) = job_queue::<TokenOccurrence>("poster", capacity);

        let poster = Arc::new(IndexPoster::new(client.clone(), router));
        let posters = TaskExecutor::new("poster", token_rx, workers, move |occurrence| {
            let poster = poster.clone();
            async move { poster.process(occurrence).await }
        });

        let tokenizer = Arc::new(DocumentTokenizer::new(lines, token_tx));
        let tokenizers = TaskExecutor::new("tokenizer", doc_rx, workers, move |doc| {
            let tokenizer = tokenizer.clone();
            async move { tokenizer.process(doc).await }
        });

        let fetcher = Arc::new(DocumentFetcher::new(client, documents, doc_tx));
        let fetchers = TaskExecutor::new("fetcher", request_rx, workers, move |request| {
            let fetcher = fetcher.clone();
            async move { fetcher.process(request).await }
        });

        let mut handles = posters.clone().start(shutdown.clone());
        handles.extend(tokenizers.clone().start(shutdown.clone()));
        handles.extend(fetchers.clone().start(shutdown));

        Self {
            requests,
            fetchers,
            tokenizers,
            posters,
            handles,
        }
    }

    /// Entry queue; the `/feeder` handler submits here.
    pub fn requests(&self) -> JobQueue<IngestionRequest> {
        self.requests.clone()
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            fetched: self.fetchers.stats(),
            tokenized: self.tokenizers.stats(),
            posted: self.posters.stats(),
        }
    }

    /// Waits for every worker to exit. Workers only exit after shutdown.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Pipeline worker panicked: {}", e);
            }
        }
    }
}
