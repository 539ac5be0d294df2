// WHY: Runs detection over many documents concurrently and records per-file statistics
// Documents are independent, so each one gets its own task over a shared read-only detector

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::detector::{CitationDetector, DetectOptions, DetectionMetrics};
use crate::discovery::output_path_for;
use crate::suspect::Suspect;

/// Batch behavior switches
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Documents processed at once
    pub concurrency: usize,
    /// Abort on the first failed document
    pub fail_fast: bool,
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get().max(1),
            fail_fast: false,
            show_progress: true,
        }
    }
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    /// Size of the document in bytes
    pub bytes: u64,
    /// Number of final suspects written
    pub suspects: usize,
    /// Wall time including I/O, in milliseconds
    pub processing_time_ms: u64,
    pub metrics: Option<DetectionMetrics>,
    /// `success` or `failed`
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    fn failed(path: &Path, elapsed: Duration, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            bytes: 0,
            suspects: 0,
            processing_time_ms: elapsed.as_millis() as u64,
            metrics: None,
            status: "failed".to_string(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Content of a `<stem>_suspects.json` file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentReport {
    pub source: String,
    pub suspects: Vec<Suspect>,
    pub metrics: DetectionMetrics,
}

/// Detect one document and write its report next to it
pub async fn process_file(path: &Path, detector: &CitationDetector, options: &DetectOptions) -> Result<FileStats> {
    let started = Instant::now();
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let (suspects, metrics) = detector.detect_with_metrics(&text, options).await?;

    let report = DocumentReport {
        source: path.display().to_string(),
        suspects,
        metrics,
    };
    let output = output_path_for(path);
    let json = serde_json::to_vec_pretty(&report)?;
    tokio::fs::write(&output, json)
        .await
        .with_context(|| format!("Cannot write {}", output.display()))?;

    Ok(FileStats {
        path: report.source,
        bytes: text.len() as u64,
        suspects: report.suspects.len(),
        processing_time_ms: started.elapsed().as_millis() as u64,
        metrics: Some(report.metrics),
        status: "success".to_string(),
        error: None,
    })
}

fn progress_bar(total: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Process `paths` concurrently, returning stats in completion order
///
/// A failed document is recorded and the batch continues, unless `fail_fast`
/// is set, in which case its error is returned.
pub async fn process_files(
    paths: Vec<PathBuf>,
    detector: Arc<CitationDetector>,
    options: DetectOptions,
    config: &BatchConfig,
) -> Result<Vec<FileStats>> {
    info!(
        "Processing {} documents with concurrency {}",
        paths.len(),
        config.concurrency
    );
    let progress = progress_bar(paths.len(), config.show_progress);
    let options = Arc::new(options);

    let mut results = stream::iter(paths)
        .map(|path| {
            let detector = Arc::clone(&detector);
            let options = Arc::clone(&options);
            async move {
                let started = Instant::now();
                let handle = tokio::spawn({
                    let path = path.clone();
                    async move { process_file(&path, &detector, &options).await }
                });
                match handle.await {
                    Ok(Ok(stats)) => stats,
                    Ok(Err(e)) => FileStats::failed(&path, started.elapsed(), format!("{:#}", e)),
                    Err(e) => FileStats::failed(&path, started.elapsed(), format!("task failed: {}", e)),
                }
            }
        })
        .buffer_unordered(config.concurrency.max(1));

    let mut all_stats = Vec::new();
    while let Some(stats) = results.next().await {
        if let Some(pb) = &progress {
            pb.set_message(stats.path.clone());
            pb.inc(1);
        }

        if !stats.is_success() {
            let message = stats.error.clone().unwrap_or_default();
            if config.fail_fast {
                error!("Failed {}: {}", stats.path, message);
                if let Some(pb) = &progress {
                    pb.abandon_with_message("Aborted");
                }
                return Err(anyhow!("Processing failed for {}: {}", stats.path, message));
            }
            warn!("Failed {} (continuing): {}", stats.path, message);
        }
        all_stats.push(stats);
    }

    if let Some(pb) = &progress {
        pb.finish_with_message("Complete");
    }

    let failed = all_stats.iter().filter(|s| !s.is_success()).count();
    info!(
        "Batch completed: {} succeeded, {} failed",
        all_stats.len() - failed,
        failed
    );
    Ok(all_stats)
}

/// Write `stats` as a JSON array
pub async fn write_stats(path: &Path, stats: &[FileStats]) -> Result<()> {
    let json = serde_json::to_vec_pretty(stats)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Cannot write stats to {}", path.display()))?;
    Ok(())
}
