//! Shard Network Protocol
//!
//! Endpoints and DTOs exchanged between the front-end and the index shards.

use serde::{Deserialize, Serialize};

pub use crate::routing::{ENDPOINT_INDEX, ENDPOINT_QUERY};

/// Inspection endpoint: `GET /catalog/:token`.
pub const ENDPOINT_CATALOG: &str = "/catalog";

/// One appearance of a normalized token, posted by the front-end to `/index`.
///
/// `token_index` counts only valid tokens seen so far on the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOccurrence {
    pub token: String,
    pub title: String,
    pub doc_id: String,
    pub line_index: usize,
    pub token_index: usize,
}

/// A document's score for one query on one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocScore {
    pub doc_id: String,
    pub doc_score: u64,
}

/// Response of a shard's `/query`.
///
/// `Default` (`count = 0`, no data) is also what the front-end substitutes for a shard
/// that could not be reached or answered with something undecodable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub data: Vec<DocScore>,
}

impl ScoreResult {
    pub fn new(data: Vec<DocScore>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
