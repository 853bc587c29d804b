//! Line Store
//!
//! Single-owner actor mapping `(doc_id, line_index)` to the line's text.
//! A missing line and an empty line both read back as `""`.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::types::{Line, LineKey};
use crate::error::StoreError;
use crate::shutdown::Shutdown;

const NAME: &str = "line store";

#[derive(Debug)]
enum LineCommand {
    Put(Line),
    Get {
        key: LineKey,
        reply: oneshot::Sender<String>,
    },
}

#[derive(Debug, Clone)]
pub struct LineStore {
    tx: mpsc::Sender<LineCommand>,
}

impl LineStore {
    pub fn spawn(capacity: usize, shutdown: Shutdown) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run(rx, shutdown));
        (Self { tx }, handle)
    }

    pub async fn put(&self, line: Line) -> Result<(), StoreError> {
        self.tx
            .send(LineCommand::Put(line))
            .await
            .map_err(|_| StoreError::Closed(NAME))
    }

    pub async fn get(&self, doc_id: &str, line_index: usize) -> String {
        let (reply, rx) = oneshot::channel();
        let cmd = LineCommand::Get {
            key: LineKey::new(doc_id, line_index),
            reply,
        };
        if self.tx.send(cmd).await.is_err() {
            tracing::warn!("Get on stopped {}, returning empty line", NAME);
            return String::new();
        }
        rx.await.unwrap_or_default()
    }
}

async fn run(mut rx: mpsc::Receiver<LineCommand>, shutdown: Shutdown) {
    let mut store: HashMap<LineKey, String> = HashMap::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(LineCommand::Put(line)) => {
                    store.insert(LineKey::new(&line.doc_id, line.line_index), line.text);
                }
                Some(LineCommand::Get { key, reply }) => {
                    let _ = reply.send(store.get(&key).cloned().unwrap_or_default());
                }
                None => break,
            },
        }
    }

    tracing::info!("Exiting {} ({} lines held)", NAME, store.len());
}
