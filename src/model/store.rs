//! src/model/store.rs
//! ============================================================================
//! # AssetStore: Authoritative Record Set Plus Browsing State
//!
//! Owns the mapping from stable identity to asset record, in insertion order,
//! and the two view-affecting fields: display mode and active folder. The
//! store is a plain owned struct passed explicitly to consumers; callers that
//! share it across tasks wrap it in `Arc<tokio::sync::Mutex<_>>` (see
//! `tasks::ingest_task`).

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::asset_record::AssetRecord;
use crate::model::tree::{self, TreeView};

/// Layout of the browsing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Grid,
    List,
}

/// Process-lifetime, in-memory record set. Append/remove only; paths are
/// never mutated in place.
#[derive(Debug, Default)]
pub struct AssetStore {
    records: Vec<AssetRecord>,
    display_mode: DisplayMode,
    active_folder: Option<String>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: DisplayMode) -> Self {
        Self {
            display_mode: mode,
            ..Self::default()
        }
    }

    /// Appends a batch of records, assigning identities to any that lack
    /// one. Preserves insertion order; always succeeds. An empty batch is a
    /// no-op with no observable effect.
    pub fn add_records(&mut self, batch: Vec<AssetRecord>) -> usize {
        let added: usize = batch.len();
        if added == 0 {
            return 0;
        }

        for mut record in batch {
            record.ensure_id();
            debug!("Adding record {} at {:?}", record.id, record.path);
            self.records.push(record);
        }
        info!("Added {added} record(s), store holds {}", self.records.len());
        added
    }

    /// Removes the record with the given identity. An absent identity is a
    /// no-op, not an error.
    pub fn remove_record(&mut self, id: &str) -> bool {
        let before: usize = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed: bool = self.records.len() < before;
        if removed {
            info!("Removed record {id}");
        }
        removed
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Raw setter; unconditional. `enter_folder`/`go_to_root` apply the
    /// browsing transitions on top of this.
    pub fn set_active_folder(&mut self, folder: Option<String>) {
        self.active_folder = folder;
    }

    pub fn active_folder(&self) -> Option<&str> {
        self.active_folder.as_deref()
    }

    /// Browsing transition: only fires from the root state. The view is one
    /// level deep, so there is no folder-to-folder transition.
    pub fn enter_folder(&mut self, key: impl Into<String>) -> bool {
        if self.active_folder.is_some() {
            return false;
        }
        self.active_folder = Some(key.into());
        true
    }

    /// Browsing transition: fires from either state.
    pub fn go_to_root(&mut self) {
        self.active_folder = None;
    }

    /// Current records in insertion order. Reflects state at call time only;
    /// no stability across mutations.
    pub fn list_records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derives the one-level folder view, recomputed fresh on every call.
    pub fn view(&self) -> TreeView {
        tree::organize(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::MemoryByteSource;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn record(path: &str) -> AssetRecord {
        AssetRecord {
            id: String::new(),
            path: path.to_string(),
            mime_type: String::new(),
            size_bytes: 1,
            last_modified_ms: 0,
            content: Arc::new(MemoryByteSource::default()),
        }
    }

    #[test]
    fn adding_a_batch_grows_by_exactly_its_size_with_distinct_ids() {
        let mut store = AssetStore::new();
        store.add_records(vec![record("a.txt"), record("b.txt"), record("c.txt")]);
        assert_eq!(store.len(), 3);

        let ids: HashSet<&str> = store.list_records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn empty_batch_is_a_silent_noop() {
        let mut store = AssetStore::new();
        store.add_records(vec![record("a.txt")]);
        let added = store.add_records(Vec::new());
        assert_eq!(added, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = AssetStore::new();
        store.add_records(vec![record("z.txt"), record("a.txt")]);
        let paths: Vec<&str> = store.list_records().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["z.txt", "a.txt"]);
    }

    #[test]
    fn removing_by_identity_and_removing_absent_ids() {
        let mut store = AssetStore::new();
        store.add_records(vec![record("a.txt"), record("b.txt")]);
        let id = store.list_records()[0].id.clone();

        assert!(store.remove_record(&id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_records()[0].path, "b.txt");

        // absent target: no-op, not an error
        assert!(!store.remove_record(&id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn pre_assigned_identities_are_kept() {
        let mut store = AssetStore::new();
        let mut rec = record("a.txt");
        rec.id = "fixed".to_string();
        store.add_records(vec![rec]);
        assert_eq!(store.list_records()[0].id, "fixed");
    }

    #[test]
    fn browsing_transitions_are_one_level_deep() {
        let mut store = AssetStore::new();
        assert_eq!(store.active_folder(), None);

        assert!(store.enter_folder("photos"));
        assert_eq!(store.active_folder(), Some("photos"));

        // no nested InFolder -> InFolder transition
        assert!(!store.enter_folder("docs"));
        assert_eq!(store.active_folder(), Some("photos"));

        store.go_to_root();
        assert_eq!(store.active_folder(), None);

        // go_to_root fires from either state
        store.go_to_root();
        assert_eq!(store.active_folder(), None);
    }

    #[test]
    fn raw_setter_is_unconditional() {
        let mut store = AssetStore::new();
        store.set_active_folder(Some("a".into()));
        store.set_active_folder(Some("b".into()));
        assert_eq!(store.active_folder(), Some("b"));
    }

    #[test]
    fn display_mode_assignment() {
        let mut store = AssetStore::with_mode(DisplayMode::List);
        assert_eq!(store.display_mode(), DisplayMode::List);
        store.set_display_mode(DisplayMode::Grid);
        assert_eq!(store.display_mode(), DisplayMode::Grid);
    }
}
