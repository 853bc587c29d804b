//! Document Tokenizer
//!
//! Second stage of the pipeline. Splits a document into non-blank lines, stores each
//! line, and emits one [`TokenOccurrence`] per valid token to the poster pool.
//! Lines and tokens of one document are handled in order by a single worker.

use anyhow::Result;

use super::normalizer::tokenize_line;
use crate::executor::types::JobQueue;
use crate::index::protocol::TokenOccurrence;
use crate::storage::lines::LineStore;
use crate::storage::types::{Document, Line};

/// Non-blank lines of `content` with their dense line index.
///
/// Blank and whitespace-only lines are skipped and do not consume an index.
pub fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
}

/// Occurrences for one line. `token_index` advances on valid tokens only.
pub fn line_occurrences(doc: &Document, line_index: usize, text: &str) -> Vec<TokenOccurrence> {
    tokenize_line(text)
        .into_iter()
        .enumerate()
        .map(|(token_index, token)| TokenOccurrence {
            token,
            title: doc.title.clone(),
            doc_id: doc.id.clone(),
            line_index,
            token_index,
        })
        .collect()
}

pub struct DocumentTokenizer {
    lines: LineStore,
    poster: JobQueue<TokenOccurrence>,
}

impl DocumentTokenizer {
    pub fn new(lines: LineStore, poster: JobQueue<TokenOccurrence>) -> Self {
        Self { lines, poster }
    }

    pub async fn process(&self, doc: Document) -> Result<()> {
        let mut line_count = 0usize;
        let mut token_count = 0usize;

        for (line_index, text) in content_lines(&doc.content) {
            self.lines
                .put(Line {
                    doc_id: doc.id.clone(),
                    line_index,
                    text: text.to_string(),
                })
                .await?;

            for occurrence in line_occurrences(&doc, line_index, text) {
                self.poster.submit(occurrence).await?;
                token_count += 1;
            }
            line_count += 1;
        }

        tracing::info!(
            "Tokenized document {} ({}): {} lines, {} tokens",
            doc.id,
            doc.title,
            line_count,
            token_count
        );
        Ok(())
    }
}
