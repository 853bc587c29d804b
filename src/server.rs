//! Service assembly for both roles.
//!
//! ## Front-end endpoints
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/feeder` | queue a `{url, title}` for ingestion |
//! | `GET`  | `/feeder` | list stored documents |
//! | `POST` | `/query` | ranked search over all shards |
//! | `GET`  | `/lines/:doc_id/:line_index` | text of one stored line |
//!
//! ## Shard endpoints
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/index` | add one token occurrence |
//! | `POST` | `/query` | score documents for a term list |
//! | `GET`  | `/catalog/:token` | inspect a token's entries |
//!
//! Any other method on `/feeder`, `/query` or `/index` gets a JSON 405.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::{FrontendConfig, PipelineConfig, ShardConfig, build_http_client};
use crate::error::method_not_allowed;
use crate::index::catalog::TokenCatalog;
use crate::index::handlers::{handle_get_catalog, handle_index, handle_query};
use crate::index::protocol::{ENDPOINT_CATALOG, ENDPOINT_INDEX, ENDPOINT_QUERY};
use crate::ingestion::handlers::{handle_feed, handle_get_line, handle_list_documents};
use crate::ingestion::pipeline::IngestionPipeline;
use crate::routing::{ShardEndpoints, ShardRouter};
use crate::search::engine::QueryAggregator;
use crate::search::handlers::handle_search;
use crate::shutdown::Shutdown;
use crate::storage::documents::DocumentStore;
use crate::storage::lines::LineStore;

/// Everything the front-end runs: both stores, the ingestion pools and the aggregator.
pub struct FrontendServices {
    pub documents: DocumentStore,
    pub lines: LineStore,
    pub pipeline: IngestionPipeline,
    pub aggregator: Arc<QueryAggregator>,
    store_handles: Vec<JoinHandle<()>>,
}

impl FrontendServices {
    pub fn start(
        endpoints: ShardEndpoints,
        config: PipelineConfig,
        client: reqwest::Client,
        shutdown: Shutdown,
    ) -> Self {
        let capacity = config.queue_capacity.get();
        let (documents, doc_handle) = DocumentStore::spawn(capacity, shutdown.clone());
        let (lines, line_handle) = LineStore::spawn(capacity, shutdown.clone());

        let pipeline = IngestionPipeline::start(
            config,
            client.clone(),
            ShardRouter::new(endpoints.clone()),
            documents.clone(),
            lines.clone(),
            shutdown,
        );
        let aggregator = Arc::new(QueryAggregator::new(client, endpoints, documents.clone()));

        Self {
            documents,
            lines,
            pipeline,
            aggregator,
            store_handles: vec![doc_handle, line_handle],
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/feeder",
                get(handle_list_documents)
                    .post(handle_feed)
                    .fallback(method_not_allowed),
            )
            .route("/query", post(handle_search).fallback(method_not_allowed))
            .route("/lines/:doc_id/:line_index", get(handle_get_line))
            .layer(Extension(self.pipeline.requests()))
            .layer(Extension(self.documents.clone()))
            .layer(Extension(self.lines.clone()))
            .layer(Extension(self.aggregator.clone()))
    }

    pub async fn join(self) {
        self.pipeline.join().await;
        for handle in self.store_handles {
            if let Err(e) = handle.await {
                tracing::error!("Store actor panicked: {}", e);
            }
        }
    }
}

/// A shard runs one token catalog.
pub struct ShardServices {
    pub catalog: TokenCatalog,
    handle: JoinHandle<()>,
}

impl ShardServices {
    pub fn start(queue_capacity: usize, shutdown: Shutdown) -> Self {
        let (catalog, handle) = TokenCatalog::spawn(queue_capacity, shutdown);
        Self { catalog, handle }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(ENDPOINT_INDEX, post(handle_index).fallback(method_not_allowed))
            .route(ENDPOINT_QUERY, post(handle_query).fallback(method_not_allowed))
            .route(&format!("{}/:token", ENDPOINT_CATALOG), get(handle_get_catalog))
            .layer(Extension(self.catalog.clone()))
    }

    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::error!("Token catalog panicked: {}", e);
        }
    }
}

/// Serves `router` until shutdown fires.
pub async fn serve(listener: TcpListener, router: Router, shutdown: Shutdown) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}

pub async fn run_frontend(config: FrontendConfig, shutdown: Shutdown) -> Result<()> {
    let endpoints = config.endpoints();
    for (shard, url) in endpoints.all() {
        tracing::info!("Shard {} -> {}", shard.label(), url);
    }

    let client = build_http_client(config.request_timeout())?;
    let services = FrontendServices::start(endpoints, config.pipeline, client, shutdown.clone());

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Front-end listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    serve(listener, services.router(), shutdown).await?;
    services.join().await;
    Ok(())
}

pub async fn run_shard(config: ShardConfig, shutdown: Shutdown) -> Result<()> {
    let services = ShardServices::start(config.queue_capacity.get(), shutdown.clone());

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Shard '{}' listening on {}", config.name, config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    serve(listener, services.router(), shutdown).await?;
    services.join().await;
    Ok(())
}
