use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::protocol::TokenOccurrence;

/// Where a token appeared: its valid-token index within a line, and the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub token_index: usize,
    pub line_index: usize,
}

/// Everything one shard knows about one token in one document.
///
/// Created on the first occurrence and only ever grown afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub doc_id: String,
    /// Overwritten by every occurrence; last write wins.
    pub title: String,
    /// Number of occurrences received for this (token, document) pair.
    pub count: u64,
    /// Positions grouped by line index, each list in arrival order.
    pub positions: BTreeMap<usize, Vec<Position>>,
}

impl DocumentEntry {
    pub fn new(doc_id: &str) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, occurrence: &TokenOccurrence) {
        self.title = occurrence.title.clone();
        self.positions
            .entry(occurrence.line_index)
            .or_default()
            .push(Position {
                token_index: occurrence.token_index,
                line_index: occurrence.line_index,
            });
        self.count += 1;
    }

    pub fn position_count(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }
}

/// `doc_id -> DocumentEntry` for one token.
pub type DocumentCatalog = HashMap<String, DocumentEntry>;
