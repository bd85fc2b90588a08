//! src/model/tree.rs
//! ============================================================================
//! # Tree Organizer: Derived One-Level Folder View
//!
//! Pure grouping of the flat record set into first-segment buckets plus a
//! root bucket. Recomputed from scratch on every call; there is no cached
//! tree and therefore no invalidation logic. O(records) per read is fine for
//! user-upload-sized sets.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::fs::path_normalizer::split_folder;
use crate::model::asset_record::AssetRecord;

/// One record as it appears in the browsing surface: display name stripped
/// of the folder prefix, full path kept for reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    pub id: String,
    pub display_name: String,
    pub full_path: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified_ms: i64,
}

/// Per-folder display summary: the bucket's record count, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub name: String,
    pub count: usize,
}

/// The derived one-level view: folder buckets plus the root bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeView {
    pub folders: IndexMap<String, Vec<TreeItem>>,
    pub root: Vec<TreeItem>,
}

impl TreeView {
    /// Records visible for the given browsing state: the root bucket when no
    /// folder is active, otherwise that folder's bucket. A folder that no
    /// longer exists yields an empty slice, never an error.
    pub fn bucket(&self, active_folder: Option<&str>) -> &[TreeItem] {
        match active_folder {
            None => &self.root,
            Some(key) => self.folders.get(key).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Folder keys with their bucket sizes, in first-encounter order.
    pub fn folder_summaries(&self) -> Vec<FolderSummary> {
        self.folders
            .iter()
            .map(|(name, bucket)| FolderSummary {
                name: name.clone(),
                count: bucket.len(),
            })
            .collect()
    }
}

/// Groups the current record set into the one-level view.
///
/// Paths with more than one segment land in their first segment's bucket
/// with the remainder as display name; single-segment paths land in the root
/// bucket. A record with an empty path is skipped with a warning, never a
/// fatal error.
pub fn organize<'a, I>(records: I) -> TreeView
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let mut view = TreeView::default();

    for record in records {
        if record.path.is_empty() {
            warn!("Record {:?} has an empty path, skipping", record.id);
            continue;
        }

        match split_folder(&record.path) {
            Some((folder, rest)) => {
                view.folders
                    .entry(folder.to_string())
                    .or_default()
                    .push(item(record, rest));
            }
            None => view.root.push(item(record, &record.path)),
        }
    }

    view
}

fn item(record: &AssetRecord, display_name: &str) -> TreeItem {
    TreeItem {
        id: record.id.clone(),
        display_name: display_name.to_string(),
        full_path: record.path.clone(),
        mime_type: record.mime_type.clone(),
        size_bytes: record.size_bytes,
        last_modified_ms: record.last_modified_ms,
    }
}
