//! src/fs/traversal.rs
//! ============================================================================
//! # Entry Traversal Engine
//!
//! Recursively expands hierarchical entries into flat, path-tagged pending
//! records. Leaves are sent into an unbounded channel as they resolve, so
//! sibling sub-traversals can interleave freely; the accumulated order carries
//! no guarantee. One `traverse` future is one completion unit: it resolves
//! only after every descendant has been drained.

use std::sync::Arc;

use futures::future::{BoxFuture, join_all};
use tokio::sync::mpsc;
use tracing::warn;

use crate::fs::entry::{ByteSource, DropEntry, EntryKind, ResolvedFile};
use crate::fs::path_normalizer::normalize;

/// A leaf produced by traversal: a resolved file plus its normalized record
/// path. Becomes an `AssetRecord` when the batch is committed to the store.
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub path: String,
    pub file: ResolvedFile,
}

/// A flat file-picker result, already resolved by the platform. Converges on
/// the same normalization as hierarchical entries.
pub struct PickedFile {
    pub name: String,
    /// Relative path inside the picked folder, when the picker provides one.
    pub relative_path: Option<String>,
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified_ms: i64,
    pub content: Arc<dyn ByteSource>,
}

/// Expands one entry into zero or more leaf records, sending each into
/// `sink`.
///
/// - file entries resolve their byte source and name, then emit one record;
///   a failed resolution is logged and skipped so one bad file never loses
///   the rest of a dropped folder;
/// - directory entries are drained batch by batch, recursing for every child
///   with the same `base_prefix`; a single empty batch is treated as
///   end-of-directory;
/// - unrecognized entry kinds complete immediately as a no-op.
///
/// Recursion is heap-boxed so arbitrarily deep trees do not grow the call
/// stack.
pub fn traverse(
    entry: Box<dyn DropEntry>,
    base_prefix: String,
    sink: mpsc::UnboundedSender<PendingRecord>,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        match entry.kind() {
            EntryKind::File => match entry.resolve_file().await {
                Ok(file) => {
                    let raw: String = entry.full_path().unwrap_or_default();
                    let path: String = normalize(&base_prefix, &raw, &file.name);
                    // A dropped receiver means the ingestion was abandoned;
                    // partial output is acceptable.
                    let _ = sink.send(PendingRecord { path, file });
                }
                Err(e) => {
                    warn!("Skipping unresolvable entry {:?}: {}", entry.name(), e);
                }
            },
            EntryKind::Directory => {
                let mut reader = match entry.open_dir().await {
                    Ok(reader) => reader,
                    Err(e) => {
                        warn!("Failed to open directory {:?}: {}", entry.name(), e);
                        return;
                    }
                };

                loop {
                    let batch = match reader.next_batch().await {
                        Ok(batch) => batch,
                        Err(e) => {
                            warn!("Directory read failed in {:?}: {}", entry.name(), e);
                            break;
                        }
                    };

                    // One empty batch counts as exhaustion. Some platform
                    // readers may need repeated polling to fully drain; if a
                    // truncated listing ever shows up, this is the spot.
                    if batch.is_empty() {
                        break;
                    }

                    let children = batch
                        .into_iter()
                        .map(|child| traverse(child, base_prefix.clone(), sink.clone()));
                    join_all(children).await;
                }
            }
            EntryKind::Unknown => {}
        }
    })
}

/// Drives one traversal unit per dropped root and collects the accumulated
/// records as a single batch once every unit has finished.
pub async fn collect_entries(
    roots: Vec<Box<dyn DropEntry>>,
    base_prefix: &str,
) -> Vec<PendingRecord> {
    let (tx, mut rx) = mpsc::unbounded_channel::<PendingRecord>();

    let units = roots
        .into_iter()
        .map(|root| traverse(root, base_prefix.to_string(), tx.clone()));
    join_all(units).await;
    drop(tx);

    let mut records: Vec<PendingRecord> = Vec::new();
    while let Some(record) = rx.recv().await {
        records.push(record);
    }
    records
}

/// Converts flat picker output into pending records under `base_prefix`.
pub fn from_picked(files: Vec<PickedFile>, base_prefix: &str) -> Vec<PendingRecord> {
    files
        .into_iter()
        .map(|picked| {
            let raw: String = picked.relative_path.unwrap_or_default();
            let path: String = normalize(base_prefix, &raw, &picked.name);
            PendingRecord {
                path,
                file: ResolvedFile {
                    name: picked.name,
                    mime_type: picked.mime_type,
                    size_bytes: picked.size_bytes,
                    last_modified_ms: picked.last_modified_ms,
                    content: picked.content,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::entry::MemoryByteSource;
    use crate::fs::entry::testing::*;
    use std::collections::BTreeSet;

    async fn collect_paths(roots: Vec<Box<dyn DropEntry>>, prefix: &str) -> BTreeSet<String> {
        collect_entries(roots, prefix)
            .await
            .into_iter()
            .map(|r| r.path)
            .collect()
    }

    #[tokio::test]
    async fn yields_every_leaf_with_ancestry_paths() {
        let tree = dir(
            "photos",
            vec![
                file("photos/cat.png"),
                dir(
                    "photos/trips",
                    vec![file("photos/trips/rome.jpg"), file("photos/trips/oslo.jpg")],
                ),
            ],
        );

        let paths = collect_paths(boxed(vec![tree]), "uploads").await;
        let expected: BTreeSet<String> = [
            "uploads/photos/cat.png",
            "uploads/photos/trips/rome.jpg",
            "uploads/photos/trips/oslo.jpg",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn drains_multi_batch_directories_completely() {
        let tree = dir_batched(
            "bulk",
            vec![
                vec![file("bulk/a.txt"), file("bulk/b.txt")],
                vec![file("bulk/c.txt")],
            ],
        );

        let paths = collect_paths(boxed(vec![tree]), "uploads").await;
        assert_eq!(paths.len(), 3);
        assert!(paths.contains("uploads/bulk/c.txt"));
    }

    #[tokio::test]
    async fn deep_breadth_tree_is_complete_regardless_of_interleaving() {
        // depth 3, breadth 3 at each level: 27 leaves
        let mut expected: BTreeSet<String> = BTreeSet::new();
        let mut roots: Vec<MemEntry> = Vec::new();
        for a in 0..3 {
            let mut mid: Vec<MemEntry> = Vec::new();
            for b in 0..3 {
                let mut leaves: Vec<MemEntry> = Vec::new();
                for c in 0..3 {
                    let path = format!("d{a}/d{b}/f{c}.bin");
                    expected.insert(format!("uploads/{path}"));
                    leaves.push(file(&path));
                }
                mid.push(dir(&format!("d{b}"), leaves));
            }
            roots.push(dir(&format!("d{a}"), mid));
        }

        let paths = collect_paths(boxed(roots), "uploads").await;
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn file_without_platform_path_uses_leaf_name() {
        let paths = collect_paths(boxed(vec![bare_file("notes.txt")]), "uploads").await;
        assert_eq!(paths.into_iter().collect::<Vec<_>>(), ["uploads/notes.txt"]);
    }

    #[tokio::test]
    async fn unknown_entry_kind_is_a_noop() {
        let paths = collect_paths(boxed(vec![opaque()]), "uploads").await;
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn broken_leaf_does_not_abort_siblings() {
        let tree = dir(
            "mixed",
            vec![file("mixed/ok.txt"), broken("bad.txt"), file("mixed/also.txt")],
        );

        let paths = collect_paths(boxed(vec![tree]), "uploads").await;
        let expected: BTreeSet<String> = ["uploads/mixed/ok.txt", "uploads/mixed/also.txt"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(paths, expected);
    }

    #[tokio::test]
    async fn empty_directory_completes_with_no_records() {
        let paths = collect_paths(boxed(vec![dir("empty", vec![])]), "uploads").await;
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn picker_files_converge_on_the_same_normalization() {
        let files = vec![
            PickedFile {
                name: "report.pdf".to_string(),
                relative_path: Some("/docs/report.pdf".to_string()),
                mime_type: "application/pdf".to_string(),
                size_bytes: 9,
                last_modified_ms: 1_700_000_000_000,
                content: Arc::new(MemoryByteSource::new(&b"%PDF-1.4\n"[..])),
            },
            PickedFile {
                name: "loose.txt".to_string(),
                relative_path: None,
                mime_type: String::new(),
                size_bytes: 0,
                last_modified_ms: 0,
                content: Arc::new(MemoryByteSource::default()),
            },
        ];

        let pending = from_picked(files, "uploads");
        let paths: Vec<&str> = pending.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["uploads/docs/report.pdf", "uploads/loose.txt"]);
    }
}
