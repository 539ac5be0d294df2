// WHY: Finds the plain-text documents a batch run should process
// Uses ignore::WalkBuilder (from ripgrep) for fast parallel traversal of deep trees

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{bail, Result};
use ignore::{WalkBuilder, WalkState};
use tracing::{debug, info, warn};

/// Suffix of the per-document output written next to each input
pub const OUTPUT_SUFFIX: &str = "_suspects.json";

/// Configuration for file discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Extension (without dot) of the documents to collect
    pub extension: String,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            follow_links: false,
        }
    }
}

/// Output path for `source`: `<stem>_suspects.json` in the same directory
pub fn output_path_for(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    source.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

fn is_candidate(path: &Path, config: &DiscoveryConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(OUTPUT_SUFFIX) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&config.extension))
}

/// All matching documents under `root_dir`, sorted by path
pub fn discover_text_files(root_dir: impl AsRef<Path>, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let root = root_dir.as_ref();
    if !root.exists() {
        bail!("Root directory does not exist: {}", root.display());
    }
    if !root.is_dir() {
        bail!("Root path is not a directory: {}", root.display());
    }

    info!("Starting directory traversal in: {}", root.display());
    let started = std::time::Instant::now();

    let walker = WalkBuilder::new(root)
        .threads((num_cpus::get() / 2).max(1))
        .follow_links(config.follow_links)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .build_parallel();

    let (tx, rx) = mpsc::channel();
    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |result| {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) && is_candidate(entry.path(), config) {
                        debug!("Found document: {}", entry.path().display());
                        let _ = tx.send(entry.into_path());
                    }
                }
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
            WalkState::Continue
        })
    });
    drop(tx);

    let mut files: Vec<PathBuf> = rx.into_iter().collect();
    files.sort();

    info!(
        "Discovery completed in {:.2}ms, found {} documents",
        started.elapsed().as_secs_f64() * 1000.0,
        files.len()
    );
    Ok(files)
}
