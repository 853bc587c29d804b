//! Ingestion Data Types
//!
//! Payloads accepted by the `/feeder` API and the responses the front-end returns.

use serde::{Deserialize, Serialize};

/// A document to ingest. Lives only on the fetcher pool's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionRequest {
    pub url: String,
    pub title: String,
}

/// Response of `GET /lines/:doc_id/:line_index`.
///
/// `text` is empty both for an unknown line and for an unknown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub doc_id: String,
    pub line_index: usize,
    pub text: String,
}

pub const MSG_PROCESSING: &str = "Request is being processed.";
