// WHY: Detection pipeline: linker (precision), regex scanner (coverage), then deduplication
// Linker failures degrade to regex-only results and never fail a detection

use std::time::Instant;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{secs_to_duration, DetectorConfig, SnippetConfig};
use crate::suspect::Suspect;

pub mod deduplicator;
pub mod linker;
pub mod patterns;
pub mod scanner;

pub use deduplicator::deduplicate;
pub use linker::{build_linker_args, parse_linker_html, run_linker, LinkerError, LinkerOptions};
pub use scanner::{run_scanner, scan_with_categories};

/// Per-call overrides of the detector defaults; `None` keeps the configured value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectOptions {
    pub use_linker: Option<bool>,
    pub linker_cmd: Option<Vec<String>>,
    pub context: Option<String>,
    pub timeout_secs: Option<f64>,
    /// Legacy clustering gap, logged only
    pub max_gap: Option<usize>,
    pub snippet: Option<SnippetConfig>,
}

/// Stage timings (seconds) and counts of one detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetrics {
    pub duration_linker_s: f64,
    pub duration_scanner_s: f64,
    pub duration_dedup_s: f64,
    pub duration_total_s: f64,
    pub num_linker: usize,
    pub num_regex: usize,
    pub num_final: usize,
}

/// Settings of one call after overrides were applied
struct ResolvedOptions {
    use_linker: bool,
    linker: LinkerOptions,
    max_gap: usize,
    snippet: SnippetConfig,
}

/// Orchestrates the detectors and the deduplicator over one document at a time
///
/// Holds no per-document state, so one instance can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct CitationDetector {
    config: DetectorConfig,
}

impl CitationDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    fn resolve(&self, options: &DetectOptions) -> ResolvedOptions {
        let command = options
            .linker_cmd
            .clone()
            .unwrap_or_else(|| self.config.linker_cmd.clone());
        let context = options
            .context
            .clone()
            .unwrap_or_else(|| self.config.linker_context.clone());
        let timeout = match options.timeout_secs {
            Some(secs) => secs_to_duration(Some(secs)),
            None => self.config.linker_timeout(),
        };

        ResolvedOptions {
            use_linker: options.use_linker.unwrap_or(self.config.use_linker),
            linker: LinkerOptions::new(command, context, timeout),
            max_gap: options.max_gap.unwrap_or(self.config.dedup_gap),
            snippet: options.snippet.unwrap_or(self.config.snippet),
        }
    }

    /// Final suspects of `text`
    pub async fn detect(&self, text: &str, options: &DetectOptions) -> Result<Vec<Suspect>> {
        let (suspects, _) = self.detect_with_metrics(text, options).await?;
        Ok(suspects)
    }

    /// Final suspects of `text` together with stage timings and counts
    pub async fn detect_with_metrics(
        &self,
        text: &str,
        options: &DetectOptions,
    ) -> Result<(Vec<Suspect>, DetectionMetrics)> {
        let resolved = self.resolve(options);
        let started = Instant::now();
        info!(
            "Starting detection: use_linker={} context={} max_gap={}",
            resolved.use_linker, resolved.linker.context, resolved.max_gap
        );

        if text.trim().is_empty() {
            info!("Empty text, nothing to detect");
            let metrics = DetectionMetrics {
                duration_total_s: started.elapsed().as_secs_f64(),
                ..DetectionMetrics::default()
            };
            return Ok((Vec::new(), metrics));
        }

        let mut linker_suspects = Vec::new();
        let mut duration_linker_s = 0.0;
        if resolved.use_linker {
            let linker_started = Instant::now();
            match run_linker(text, &resolved.linker).await {
                Ok(found) => linker_suspects = found,
                Err(e) => warn!("Linker unavailable, continuing with regex only: {}", e),
            }
            duration_linker_s = linker_started.elapsed().as_secs_f64();
            info!(
                "Precision(Linker): {} references in {:.3}s",
                linker_suspects.len(),
                duration_linker_s
            );
        }

        let scanner_started = Instant::now();
        let regex_suspects = run_scanner(text)?;
        let duration_scanner_s = scanner_started.elapsed().as_secs_f64();
        info!(
            "Coverage(Regex): {} references in {:.3}s",
            regex_suspects.len(),
            duration_scanner_s
        );

        let dedup_started = Instant::now();
        let suspects = deduplicate(text, &linker_suspects, &regex_suspects, &resolved.snippet);
        let duration_dedup_s = dedup_started.elapsed().as_secs_f64();
        let duration_total_s = started.elapsed().as_secs_f64();
        info!(
            "Deduplication: {} final references in {:.3}s (total={:.3}s)",
            suspects.len(),
            duration_dedup_s,
            duration_total_s
        );

        let metrics = DetectionMetrics {
            duration_linker_s,
            duration_scanner_s,
            duration_dedup_s,
            duration_total_s,
            num_linker: linker_suspects.len(),
            num_regex: regex_suspects.len(),
            num_final: suspects.len(),
        };
        Ok((suspects, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_only() -> DetectOptions {
        DetectOptions {
            use_linker: Some(false),
            ..DetectOptions::default()
        }
    }

    #[tokio::test]
    async fn test_empty_text_returns_nothing() {
        // the default linker command is never spawned for blank input
        let detector = CitationDetector::default();
        let (suspects, metrics) = detector
            .detect_with_metrics("  \n\t ", &DetectOptions::default())
            .await
            .unwrap();
        assert!(suspects.is_empty());
        assert_eq!(metrics.num_final, 0);
        assert_eq!(metrics.duration_linker_s, 0.0);
    }

    #[tokio::test]
    async fn test_regex_only_detection() {
        let detector = CitationDetector::default();
        let text = "O servidor invocou a Lei nº 8.112/90 perante o tribunal.";
        let (suspects, metrics) = detector.detect_with_metrics(text, &regex_only()).await.unwrap();

        assert_eq!(suspects.len(), 1);
        assert_eq!(suspects[0].suspect_string, "Lei nº 8.112/90");
        assert_eq!(suspects[0].context_snippet, text);
        assert_eq!(metrics.num_linker, 0);
        assert_eq!(metrics.num_regex, 1);
        assert_eq!(metrics.num_final, 1);
    }

    #[tokio::test]
    async fn test_failing_linker_degrades_to_regex() {
        let detector = CitationDetector::default();
        let options = DetectOptions {
            use_linker: Some(true),
            linker_cmd: Some(vec!["/nonexistent/linkertool".to_string()]),
            ..DetectOptions::default()
        };
        let text = "Aplica-se a Súmula 473 do STF.";
        let suspects = detector.detect(text, &options).await.unwrap();
        assert_eq!(suspects.len(), 1);
        assert!(!suspects[0].is_linker());
    }

    #[test]
    fn test_overrides_are_resolved_once() {
        let detector = CitationDetector::new(DetectorConfig {
            linker_cmd: vec!["linker".to_string()],
            ..DetectorConfig::default()
        });
        let resolved = detector.resolve(&DetectOptions {
            context: Some("sp".to_string()),
            timeout_secs: Some(2.5),
            max_gap: Some(3),
            ..DetectOptions::default()
        });

        assert!(resolved.use_linker);
        assert_eq!(resolved.linker.command, vec!["linker"]);
        assert_eq!(resolved.linker.context, "sp");
        assert_eq!(resolved.linker.timeout, Some(std::time::Duration::from_millis(2500)));
        assert_eq!(resolved.max_gap, 3);
        assert_eq!(resolved.snippet, SnippetConfig::default());
    }

    #[test]
    fn test_metrics_serialize() {
        let json = serde_json::to_value(DetectionMetrics::default()).unwrap();
        assert_eq!(json["num_final"], 0);
        assert!(json.get("duration_total_s").is_some());
    }
}
