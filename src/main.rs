//! src/main.rs
//! ============================================================================
//! # Dropspace Demo CLI
//!
//! Ingests the given files and directories through the local-filesystem entry
//! implementation into a fresh store, then prints the organized one-level
//! view: folders with their counts first, then root-level files. `--json`
//! emits the view as JSON instead; `--list` starts in list mode.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

use dropspace::{
    Logger,
    config::config::Config,
    fs::{entry::DropEntry, local::LocalEntry},
    model::{
        store::{AssetStore, DisplayMode},
        tree::TreeView,
    },
    tasks::ingest_task::{IngestEvent, spawn_ingest},
};

#[tokio::main]
async fn main() -> Result<()> {
    Logger::init_tracing();
    info!("Starting dropspace demo");

    let mut as_json: bool = false;
    let mut as_list: bool = false;
    let mut paths: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "--list" => as_list = true,
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        eprintln!("usage: dropspace [--json] [--list] <path>...");
        return Ok(());
    }

    let config: Arc<Config> = Arc::new(Config::load().await.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    }));

    let mut roots: Vec<Box<dyn DropEntry>> = Vec::new();
    for path in &paths {
        match LocalEntry::from_path(path).await {
            Ok(entry) => roots.push(Box::new(entry)),
            Err(e) => warn!("Skipping {path:?}: {e}"),
        }
    }

    let mode: DisplayMode = if as_list {
        DisplayMode::List
    } else {
        config.default_display_mode
    };
    let store: Arc<Mutex<AssetStore>> = Arc::new(Mutex::new(AssetStore::with_mode(mode)));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<IngestEvent>();
    spawn_ingest(store.clone(), roots, config, event_tx)
        .await
        .context("Ingestion task failed")?;

    if let Ok(IngestEvent::Completed { added, folder }) = event_rx.try_recv() {
        println!("{added} file(s) uploaded into {folder:?}\n");
    }

    let guard = store.lock().await;
    let view: TreeView = guard.view();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view, guard.display_mode());
    }

    Ok(())
}

fn print_view(view: &TreeView, mode: DisplayMode) {
    println!("[{mode:?}]");

    let summaries = view.folder_summaries();
    if !summaries.is_empty() {
        println!("Folders:");
        for summary in &summaries {
            let plural: &str = if summary.count == 1 { "item" } else { "items" };
            println!("  {}/  ({} {plural})", summary.name, summary.count);
        }
    }

    if !view.root.is_empty() {
        println!("Files:");
        for item in &view.root {
            println!(
                "  {}  {}  {}",
                item.display_name,
                bytesize::ByteSize::b(item.size_bytes),
                if item.mime_type.is_empty() {
                    "unknown"
                } else {
                    item.mime_type.as_str()
                },
            );
        }
    }
}
