use super::catalog::TokenCatalog;
use super::protocol::{ScoreResult, TokenOccurrence};
use super::scoring::score_terms;
use super::types::DocumentCatalog;
use crate::error::{ApiError, StatusMessage};
use axum::body::Bytes;
use axum::extract::Path;
use axum::{Extension, Json};

pub const MSG_INDEXING: &str = "Tokens are being added to index.";

/// `POST /index`: accept one token occurrence.
///
/// Always acknowledged; a payload that does not parse is logged and discarded.
pub async fn handle_index(
    Extension(catalog): Extension<TokenCatalog>,
    body: Bytes,
) -> Json<StatusMessage> {
    match serde_json::from_slice::<TokenOccurrence>(&body) {
        Ok(occurrence) => {
            tracing::debug!("Token received: {:?}", occurrence);
            if let Err(e) = catalog.add(occurrence).await {
                tracing::error!("Dropping token: {}", e);
            }
        }
        Err(e) => tracing::warn!("Discarding unparsable token payload: {}", e),
    }

    Json(StatusMessage::ok(MSG_INDEXING))
}

/// `POST /query`: score this shard's documents against a list of terms.
pub async fn handle_query(
    Extension(catalog): Extension<TokenCatalog>,
    body: Bytes,
) -> Result<Json<ScoreResult>, ApiError> {
    let terms: Vec<String> = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Unable to parse query payload: {}", e);
        ApiError::BadPayload
    })?;

    let result = score_terms(&catalog, &terms).await;
    tracing::info!("Query {:?} matched {} documents", terms, result.count);
    Ok(Json(result))
}

/// `GET /catalog/:token`: the raw catalog entry for a token.
pub async fn handle_get_catalog(
    Path(token): Path<String>,
    Extension(catalog): Extension<TokenCatalog>,
) -> Json<DocumentCatalog> {
    Json(catalog.get_catalog(&token).await)
}
