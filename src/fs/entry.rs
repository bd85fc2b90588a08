//! src/fs/entry.rs
//! ============================================================================
//! # Entry Capabilities: Files, Directories, Byte Sources
//!
//! Trait seams for everything the platform hands the ingestion core: a
//! hierarchical entry (file or directory, resolved asynchronously), a
//! batched directory reader, and an opaque byte source that vends transient,
//! lease-counted views for preview and download.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;

/// What a hierarchical entry claims to be before it is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Capability the core does not recognize; traversal treats it as a no-op.
    Unknown,
}

/// A file's metadata plus its byte-source handle, produced by resolving a
/// file entry. The content is referenced, never copied.
#[derive(Clone)]
pub struct ResolvedFile {
    pub name: String,
    /// May be empty when the platform cannot tell (treated as "unknown").
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified_ms: i64,
    pub content: Arc<dyn ByteSource>,
}

impl std::fmt::Debug for ResolvedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .field("last_modified_ms", &self.last_modified_ms)
            .finish_non_exhaustive()
    }
}

/// One hierarchical entry handed over by the platform (a dropped item).
///
/// Only the capability matching `kind()` is expected to succeed; calling the
/// other one may return an error, which traversal isolates per entry.
#[async_trait]
pub trait DropEntry: Send + Sync {
    fn kind(&self) -> EntryKind;

    /// Leaf name of the entry.
    fn name(&self) -> String;

    /// Path of this entry relative to the drop root, when the platform
    /// provides one. Falls back to `name()` during normalization otherwise.
    fn full_path(&self) -> Option<String>;

    /// File capability: resolve the entry's metadata and byte source.
    /// This is a suspension point.
    async fn resolve_file(&self) -> Result<ResolvedFile, AppError>;

    /// Directory capability: open a batched reader over the children.
    async fn open_dir(&self) -> Result<Box<dyn DirReader>, AppError>;
}

/// Batched reader over a directory's children. Each read is a suspension
/// point; an empty batch signals end-of-directory.
#[async_trait]
pub trait DirReader: Send {
    async fn next_batch(&mut self) -> Result<Vec<Box<dyn DropEntry>>, AppError>;
}

/// Opaque byte access for one record's content. Views are scoped leases:
/// dropping a [`ByteView`] releases it, on every exit path.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Opens a transient view onto the bytes.
    async fn open(&self) -> Result<ByteView, AppError>;

    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of currently outstanding views, for leak detection.
    fn active_views(&self) -> usize;
}

/// Shared counter of outstanding views on one byte source.
#[derive(Debug, Clone, Default)]
pub struct ViewCounter(Arc<AtomicUsize>);

impl ViewCounter {
    pub fn acquire(&self) -> ViewLease {
        self.0.fetch_add(1, Ordering::Relaxed);
        ViewLease(Arc::clone(&self.0))
    }

    pub fn outstanding(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lease held by one live [`ByteView`]; released on drop.
#[derive(Debug)]
pub struct ViewLease(Arc<AtomicUsize>);

impl Drop for ViewLease {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// A transient, revocable view onto a record's bytes.
#[derive(Debug)]
pub struct ByteView {
    data: Bytes,
    _lease: ViewLease,
}

impl ByteView {
    pub fn new(data: Bytes, lease: ViewLease) -> Self {
        Self { data, _lease: lease }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Byte source backed by an in-memory buffer. Used for picker uploads whose
/// bytes the platform already materialized, and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryByteSource {
    data: Bytes,
    views: ViewCounter,
}

impl MemoryByteSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            views: ViewCounter::default(),
        }
    }
}

#[async_trait]
impl ByteSource for MemoryByteSource {
    async fn open(&self) -> Result<ByteView, AppError> {
        Ok(ByteView::new(self.data.clone(), self.views.acquire()))
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn active_views(&self) -> usize {
        self.views.outstanding()
    }
}
