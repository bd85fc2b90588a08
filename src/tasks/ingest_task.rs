//! src/tasks/ingest_task.rs
//! ============================================================================
//! # Ingest Task: Background Ingestion With Completion Events
//!
//! Drives traversal of dropped roots (or flat picker output) and commits the
//! accumulated records to the store as a single batch. Completion of a
//! non-empty batch is reported upward over an mpsc channel so the
//! presentation layer can surface a message; empty batches stay silent.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::info;

use crate::config::config::Config;
use crate::fs::entry::DropEntry;
use crate::fs::traversal::{self, PendingRecord, PickedFile};
use crate::model::asset_record::AssetRecord;
use crate::model::store::AssetStore;

/// Event sent to the presentation layer when ingestion finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// A non-empty batch landed in the store.
    Completed { added: usize, folder: String },
}

/// Spawns a Tokio task that traverses `roots` and commits the result.
///
/// The store is behind a mutex because the task runs concurrently with
/// whoever else holds the handle; append/remove invariants survive real
/// parallelism that way.
pub fn spawn_ingest(
    store: Arc<Mutex<AssetStore>>,
    roots: Vec<Box<dyn DropEntry>>,
    config: Arc<Config>,
    events: mpsc::UnboundedSender<IngestEvent>,
) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move {
        let pending = traversal::collect_entries(roots, &config.root_prefix).await;
        commit(&store, pending, &config.root_prefix, &events).await
    })
}

/// Ingests flat picker output: same normalization, same batch commit, same
/// notification rules as the hierarchical path.
pub async fn ingest_picked(
    store: &Mutex<AssetStore>,
    files: Vec<PickedFile>,
    config: &Config,
    events: &mpsc::UnboundedSender<IngestEvent>,
) -> usize {
    let pending = traversal::from_picked(files, &config.root_prefix);
    commit(store, pending, &config.root_prefix, events).await
}

async fn commit(
    store: &Mutex<AssetStore>,
    pending: Vec<PendingRecord>,
    folder: &str,
    events: &mpsc::UnboundedSender<IngestEvent>,
) -> usize {
    if pending.is_empty() {
        return 0;
    }

    let batch: Vec<AssetRecord> = pending.into_iter().map(AssetRecord::from_pending).collect();
    let added: usize = store.lock().await.add_records(batch);

    info!("Ingestion complete: {added} record(s) under {folder:?}");
    let _ = events.send(IngestEvent::Completed {
        added,
        folder: folder.to_string(),
    });
    added
}
