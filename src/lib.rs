//! lib.rs — Virtual File-Tree Ingestion and Organization Core
//! -----------------------------------------------------------
//! Ingests dropped files and folders into a flat, identity-stable record set
//! and re-derives a one-level folder view for browsing. Rendering, native
//! pickers and notification display are external collaborators behind the
//! trait seams in `fs::entry`.
//! Only re-export what you want public in the library crate root.

/// --- Error handling (unified error type for the crate) ---
pub mod error;

/// --- Configuration: root prefix, display defaults ---
pub mod config {
    pub mod config;
}

/// --- Filesystem abstraction: entries, traversal, normalization ---
pub mod fs {
    pub mod entry;
    pub mod local;
    pub mod path_normalizer;
    pub mod traversal;
}

/// --- State/data models: records, store, derived tree view ---
pub mod model {
    pub mod asset_record;
    pub mod store;
    pub mod tree;
}

/// --- Background/async tasks ---
pub mod tasks {
    pub mod ingest_task;
}

pub mod logging;
pub use logging::Logger;

/// --- Crate-level re-exports for the most important types ---
pub use error::AppError;
pub use fs::entry::{ByteSource, ByteView, DropEntry, EntryKind};
pub use model::{
    asset_record::AssetRecord,
    store::{AssetStore, DisplayMode},
    tree::TreeView,
};
pub use tasks::ingest_task::IngestEvent;
