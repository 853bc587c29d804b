//! Document Store
//!
//! Single-owner actor holding every fetched [`Document`]. All reads and writes go
//! through its mailbox and are applied one at a time, so callers never need a lock.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::types::Document;
use crate::error::StoreError;
use crate::shutdown::Shutdown;

const NAME: &str = "document store";

enum DocumentCommand {
    Put(Document),
    Get {
        id: String,
        reply: oneshot::Sender<Document>,
    },
    GetAll {
        reply: oneshot::Sender<Vec<Document>>,
    },
}

/// Cloneable handle to the document store actor.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    tx: mpsc::Sender<DocumentCommand>,
}

impl std::fmt::Debug for DocumentCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentCommand::Put(doc) => write!(f, "Put({})", doc.id),
            DocumentCommand::Get { id, .. } => write!(f, "Get({id})"),
            DocumentCommand::GetAll { .. } => write!(f, "GetAll"),
        }
    }
}

impl DocumentStore {
    /// Starts the actor. It runs until `shutdown` fires or every handle is dropped.
    pub fn spawn(capacity: usize, shutdown: Shutdown) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run(rx, shutdown));
        (Self { tx }, handle)
    }

    /// Upsert; the last write for an id wins.
    pub async fn put(&self, doc: Document) -> Result<(), StoreError> {
        self.tx
            .send(DocumentCommand::Put(doc))
            .await
            .map_err(|_| StoreError::Closed(NAME))
    }

    /// Returns the stored document, or the empty document if `id` is unknown.
    pub async fn get(&self, id: &str) -> Document {
        let (reply, rx) = oneshot::channel();
        let cmd = DocumentCommand::Get {
            id: id.to_string(),
            reply,
        };
        if self.tx.send(cmd).await.is_err() {
            tracing::warn!("Get on stopped {}, returning empty document", NAME);
            return Document::default();
        }
        rx.await.unwrap_or_default()
    }

    /// Every stored document, in no particular order.
    pub async fn get_all(&self) -> Vec<Document> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(DocumentCommand::GetAll { reply }).await.is_err() {
            tracing::warn!("GetAll on stopped {}, returning no documents", NAME);
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }
}

async fn run(mut rx: mpsc::Receiver<DocumentCommand>, shutdown: Shutdown) {
    let mut store: HashMap<String, Document> = HashMap::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(cmd) => apply(&mut store, cmd),
                None => break,
            },
        }
    }

    tracing::info!("Exiting {} ({} documents held)", NAME, store.len());
}

fn apply(store: &mut HashMap<String, Document>, cmd: DocumentCommand) {
    tracing::trace!("{}: {:?}", NAME, cmd);
    match cmd {
        DocumentCommand::Put(doc) => {
            store.insert(doc.id.clone(), doc);
        }
        DocumentCommand::Get { id, reply } => {
            let doc = store.get(&id).cloned().unwrap_or_default();
            // The caller may have gone away; nothing to do then.
            let _ = reply.send(doc);
        }
        DocumentCommand::GetAll { reply } => {
            let _ = reply.send(store.values().cloned().collect());
        }
    }
}
