//! Document Fetcher
//!
//! First stage of the pipeline: retrieve the source text of an [`IngestionRequest`],
//! turn it into a [`Document`] with a fresh id, store it, and pass it on to the
//! tokenizer pool.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use sha2::{Digest, Sha256};

use super::types::IngestionRequest;
use crate::error::FetchError;
use crate::executor::types::JobQueue;
use crate::storage::documents::DocumentStore;
use crate::storage::types::Document;

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a new id on every call, even for identical titles.
///
/// The id is the hex SHA-256 of the lower-cased title salted with the current time
/// in nanoseconds and a process-wide sequence number.
pub fn generate_document_id(title: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}-{}", title.to_lowercase(), nanos, seq).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// GETs `url`. Any status above 200 counts as a failure.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status().as_u16();
    if status > 200 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

pub struct DocumentFetcher {
    client: reqwest::Client,
    documents: DocumentStore,
    tokenizer: JobQueue<Document>,
}

impl DocumentFetcher {
    pub fn new(
        client: reqwest::Client,
        documents: DocumentStore,
        tokenizer: JobQueue<Document>,
    ) -> Self {
        Self {
            client,
            documents,
            tokenizer,
        }
    }

    /// Fetch, store, hand off. A fetch failure drops the request; nothing is stored.
    pub async fn process(&self, request: IngestionRequest) -> Result<()> {
        let content = fetch_text(&self.client, &request.url).await?;

        let doc = Document {
            id: generate_document_id(&request.title),
            title: request.title,
            url: request.url,
            content,
        };
        tracing::info!(
            "Fetched {} ({} bytes) as document {}",
            doc.url,
            doc.content.len(),
            doc.id
        );

        // Store first: a document may end up stored but never tokenized, not the reverse.
        self.documents.put(doc.clone()).await?;
        self.tokenizer.submit(doc).await?;
        Ok(())
    }
}
