use super::engine::QueryAggregator;
use crate::error::ApiError;
use crate::storage::types::DocumentSummary;
use axum::body::Bytes;
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::Instrument;

const MSG_BAD_QUERY: &str = "Error occurred while processing the query.";

/// `POST /query`: body is a JSON array of search terms.
pub async fn handle_search(
    Extension(aggregator): Extension<Arc<QueryAggregator>>,
    body: Bytes,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let terms: Vec<String> = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Unable to parse request: {}", e);
        ApiError::BadPayload
    })?;

    let span = tracing::info_span!("query", id = %uuid::Uuid::new_v4());
    let ranked = async {
        tracing::info!("Searching for {:?}", terms);
        let ranked = aggregator.search(&terms).await;
        if let Ok(docs) = &ranked {
            tracing::info!("{} documents ranked", docs.len());
        }
        ranked
    }
    .instrument(span)
    .await
    .map_err(|e| {
        tracing::error!("Query failed: {:#}", e);
        ApiError::Internal(MSG_BAD_QUERY)
    })?;

    Ok(Json(ranked.iter().map(DocumentSummary::from).collect()))
}
