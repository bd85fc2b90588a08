//! src/fs/local.rs
//! ============================================================================
//! # Local Filesystem Entries
//!
//! `DropEntry` implementation over the local filesystem, used by the demo
//! binary and the integration tests. Plays the role the browser's drag-drop
//! entries play in production: a dropped directory expands into relative
//! paths rooted at its own name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use crate::error::AppError;
use crate::fs::entry::{
    ByteSource, ByteView, DirReader, DropEntry, EntryKind, ResolvedFile, ViewCounter,
};

/// One local file or directory, tagged with its path relative to the drop
/// root.
pub struct LocalEntry {
    path: PathBuf,
    rel: String,
    kind: EntryKind,
}

impl LocalEntry {
    /// Builds a root entry for a dropped path. The entry's own name becomes
    /// the first segment of every descendant's relative path.
    pub async fn from_path(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path: PathBuf = path.into();
        let meta = tokio::fs::symlink_metadata(&path).await?;

        let kind: EntryKind = if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            // symlinks, sockets, ...
            EntryKind::Unknown
        };

        let rel: String = leaf_name(&path);
        Ok(Self { path, rel, kind })
    }

    fn child(path: PathBuf, parent_rel: &str, kind: EntryKind) -> Self {
        let rel: String = format!("{parent_rel}/{}", leaf_name(&path));
        Self { path, rel, kind }
    }
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl DropEntry for LocalEntry {
    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn name(&self) -> String {
        leaf_name(&self.path)
    }

    fn full_path(&self) -> Option<String> {
        Some(self.rel.clone())
    }

    async fn resolve_file(&self) -> Result<ResolvedFile, AppError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| AppError::Entry {
                name: self.name(),
                source: e,
            })?;

        let last_modified_ms: i64 = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        let mime_type: String = mime_guess::from_path(&self.path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(ResolvedFile {
            name: self.name(),
            mime_type,
            size_bytes: meta.len(),
            last_modified_ms,
            content: Arc::new(FileByteSource {
                path: self.path.clone(),
                size: meta.len(),
                views: ViewCounter::default(),
            }),
        })
    }

    async fn open_dir(&self) -> Result<Box<dyn DirReader>, AppError> {
        let read_dir = tokio::fs::read_dir(&self.path).await?;
        Ok(Box::new(LocalDirReader {
            read_dir: Some(read_dir),
            parent_rel: self.rel.clone(),
        }))
    }
}

/// Reader yielding a directory's children as one batch, then an empty batch.
struct LocalDirReader {
    read_dir: Option<tokio::fs::ReadDir>,
    parent_rel: String,
}

#[async_trait]
impl DirReader for LocalDirReader {
    async fn next_batch(&mut self) -> Result<Vec<Box<dyn DropEntry>>, AppError> {
        let Some(mut read_dir) = self.read_dir.take() else {
            return Ok(Vec::new());
        };

        let mut batch: Vec<Box<dyn DropEntry>> = Vec::new();
        while let Some(dirent) = read_dir.next_entry().await? {
            let path: PathBuf = dirent.path();
            let kind: EntryKind = match dirent.file_type().await {
                Ok(ft) if ft.is_dir() => EntryKind::Directory,
                Ok(ft) if ft.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Unknown,
                Err(e) => {
                    // Log the error but continue processing other entries
                    warn!("Failed to stat {:?}: {}", path, e);
                    continue;
                }
            };
            batch.push(Box::new(LocalEntry::child(path, &self.parent_rel, kind)));
        }
        Ok(batch)
    }
}

/// Byte source that reads a local file lazily, once per view.
struct FileByteSource {
    path: PathBuf,
    size: u64,
    views: ViewCounter,
}

#[async_trait]
impl ByteSource for FileByteSource {
    async fn open(&self) -> Result<ByteView, AppError> {
        let data: Vec<u8> = tokio::fs::read(&self.path).await?;
        Ok(ByteView::new(Bytes::from(data), self.views.acquire()))
    }

    fn len(&self) -> u64 {
        self.size
    }

    fn active_views(&self) -> usize {
        self.views.outstanding()
    }
}
