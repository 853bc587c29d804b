//! Storage Data Types
//!
//! Records owned by the front-end's in-memory stores.

use serde::{Deserialize, Serialize};

/// A fetched document.
///
/// Created once by the fetcher pool and never mutated. `content` stays inside the
/// front-end: shards only ever see tokens, and the HTTP API only sees
/// [`DocumentSummary`]. `Default` is the empty document returned for unknown ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: String,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// The public view of a document: id and content are withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub title: String,
    pub url: String,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            url: doc.url.clone(),
        }
    }
}

/// One non-blank line of a document.
///
/// `line_index` counts non-blank lines only, so it is dense over the document's
/// content rather than the literal line number in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub doc_id: String,
    pub line_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub doc_id: String,
    pub line_index: usize,
}

impl LineKey {
    pub fn new(doc_id: &str, line_index: usize) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            line_index,
        }
    }
}
