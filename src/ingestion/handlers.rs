use super::types::{IngestionRequest, LineResponse, MSG_PROCESSING};
use crate::error::{ApiError, StatusMessage};
use crate::executor::types::JobQueue;
use crate::storage::documents::DocumentStore;
use crate::storage::lines::LineStore;
use crate::storage::types::DocumentSummary;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};

/// `POST /feeder`: queue a document for ingestion and acknowledge immediately.
///
/// The caller is never told whether the fetch or indexing later succeeds.
pub async fn handle_feed(
    Extension(requests): Extension<JobQueue<IngestionRequest>>,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusMessage>), ApiError> {
    let request: IngestionRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Unable to parse feeder payload: {}", e);
        ApiError::BadPayload
    })?;

    tracing::info!("Ingestion requested: {} ({})", request.url, request.title);

    if let Err(e) = requests.submit(request).await {
        tracing::error!("Dropping ingestion request: {}", e);
    }

    Ok((StatusCode::ACCEPTED, Json(StatusMessage::ok(MSG_PROCESSING))))
}

/// `GET /feeder`: every stored document, title and url only.
pub async fn handle_list_documents(
    Extension(documents): Extension<DocumentStore>,
) -> Json<Vec<DocumentSummary>> {
    let docs = documents.get_all().await;
    Json(docs.iter().map(DocumentSummary::from).collect())
}

pub async fn handle_get_line(
    Path((doc_id, line_index)): Path<(String, usize)>,
    Extension(lines): Extension<LineStore>,
) -> Json<LineResponse> {
    let text = lines.get(&doc_id, line_index).await;
    Json(LineResponse {
        doc_id,
        line_index,
        text,
    })
}
