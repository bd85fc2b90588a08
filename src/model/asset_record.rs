//! src/model/asset_record.rs
//! ============================================================================
//! # AssetRecord: One Ingested File
//!
//! Metadata for a single ingested file plus a shared handle to its bytes.
//! Records are created only by ingestion and owned by the `AssetStore` until
//! removed; their identity is the stable key used for removal and byte
//! access, independent of the path.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::fs::entry::{ByteSource, ByteView};
use crate::fs::traversal::PendingRecord;

/// Core record struct for an ingested file.
#[derive(Clone)]
pub struct AssetRecord {
    /// Stable identity, unique for the store's lifetime. Empty until the
    /// store assigns one at insertion.
    pub id: String,

    /// Normalized, slash-delimited, root-relative path. Never empty, no
    /// leading slash, no empty segments.
    pub path: String,

    /// May be empty ("unknown").
    pub mime_type: String,

    pub size_bytes: u64,

    pub last_modified_ms: i64,

    /// Opaque byte access, referenced rather than copied.
    pub content: Arc<dyn ByteSource>,
}

impl AssetRecord {
    /// Builds a record from traversal (or picker) output. Identity is left
    /// unassigned; the store fills it in at insertion.
    pub fn from_pending(pending: PendingRecord) -> Self {
        Self {
            id: String::new(),
            path: pending.path,
            mime_type: pending.file.mime_type,
            size_bytes: pending.file.size_bytes,
            last_modified_ms: pending.file.last_modified_ms,
            content: pending.file.content,
        }
    }

    /// Assigns a fresh identity unless one is already set.
    pub(crate) fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
    }

    /// Opens a transient, revocable view onto the record's bytes. The caller
    /// releases it by dropping it.
    pub async fn open_view(&self) -> Result<ByteView, AppError> {
        self.content.open().await
    }

    /// Human-friendly file size.
    pub fn size_human(&self) -> String {
        bytesize::ByteSize::b(self.size_bytes).to_string()
    }

    /// Modification time as UTC, for display and sorting. Falls back to the
    /// epoch when the timestamp is out of range.
    pub fn modified(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.last_modified_ms)
            .single()
            .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// Whether the browsing surface can preview the record inline.
    pub fn is_previewable(&self) -> bool {
        self.is_image() || self.is_video()
    }

    pub fn is_archive(&self) -> bool {
        ["zip", "archive", "tar", "rar"]
            .iter()
            .any(|tag| self.mime_type.contains(tag))
    }

    pub fn is_text(&self) -> bool {
        self.mime_type.contains("text") || self.mime_type.contains("document")
    }
}

impl std::fmt::Debug for AssetRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRecord")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .field("last_modified_ms", &self.last_modified_ms)
            .finish_non_exhaustive()
    }
}
