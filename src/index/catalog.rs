//! Token Catalog
//!
//! The shard's inverted index: `token -> doc_id -> DocumentEntry`. Owned by a single
//! actor task; `/index` writes and `/query` reads are serialized through its mailbox.
//! Nothing is ever evicted or compacted.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::protocol::TokenOccurrence;
use super::types::{DocumentCatalog, DocumentEntry};
use crate::error::StoreError;
use crate::shutdown::Shutdown;

const NAME: &str = "token catalog";

#[derive(Debug)]
enum CatalogCommand {
    Add(TokenOccurrence),
    Get {
        token: String,
        reply: oneshot::Sender<DocumentCatalog>,
    },
    Size {
        reply: oneshot::Sender<usize>,
    },
}

#[derive(Debug, Clone)]
pub struct TokenCatalog {
    tx: mpsc::Sender<CatalogCommand>,
}

impl TokenCatalog {
    pub fn spawn(capacity: usize, shutdown: Shutdown) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run(rx, shutdown));
        (Self { tx }, handle)
    }

    /// Queues an occurrence. Returns once the mailbox accepted it, not once it is applied.
    pub async fn add(&self, occurrence: TokenOccurrence) -> Result<(), StoreError> {
        self.tx
            .send(CatalogCommand::Add(occurrence))
            .await
            .map_err(|_| StoreError::Closed(NAME))
    }

    /// The token's documents; empty if the token was never indexed here.
    pub async fn get_catalog(&self, token: &str) -> DocumentCatalog {
        let (reply, rx) = oneshot::channel();
        let cmd = CatalogCommand::Get {
            token: token.to_string(),
            reply,
        };
        if self.tx.send(cmd).await.is_err() {
            tracing::warn!("Get on stopped {}, returning empty catalog", NAME);
            return DocumentCatalog::new();
        }
        rx.await.unwrap_or_default()
    }

    /// Number of distinct tokens held.
    pub async fn token_count(&self) -> usize {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(CatalogCommand::Size { reply }).await.is_err() {
            return 0;
        }
        rx.await.unwrap_or_default()
    }
}

async fn run(mut rx: mpsc::Receiver<CatalogCommand>, shutdown: Shutdown) {
    let mut store: HashMap<String, DocumentCatalog> = HashMap::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(cmd) => apply(&mut store, cmd),
                None => break,
            },
        }
    }

    tracing::info!("Exiting {} ({} tokens held)", NAME, store.len());
}

fn apply(store: &mut HashMap<String, DocumentCatalog>, cmd: CatalogCommand) {
    match cmd {
        CatalogCommand::Add(occurrence) => {
            let entry = store
                .entry(occurrence.token.clone())
                .or_default()
                .entry(occurrence.doc_id.clone())
                .or_insert_with(|| DocumentEntry::new(&occurrence.doc_id));
            entry.record(&occurrence);
        }
        CatalogCommand::Get { token, reply } => {
            let _ = reply.send(store.get(&token).cloned().unwrap_or_default());
        }
        CatalogCommand::Size { reply } => {
            let _ = reply.send(store.len());
        }
    }
}
