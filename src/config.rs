// WHY: Detector defaults in one place, applied once at the orchestrator boundary
// Every downstream operation receives its settings as explicit arguments

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::boundary::WindowLimits;

/// Default linker invocation: the official LexML Linker container
pub const DEFAULT_LINKER_CMD: &str = "docker run -i --rm lexmlbr/lexml-linker:latest /usr/bin/linkertool";

/// Snippet window sizes and edge policy used by the deduplicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Bytes kept around a span before boundary search starts
    pub min_chars: usize,
    /// Furthest the boundary search may travel; `None` or `0` scans to the document edge
    pub max_chars: Option<usize>,
    /// Pin snippet edges to linker spans that sit on a cluster's coverage edge
    pub prefer_linker_edges: bool,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            min_chars: 120,
            max_chars: Some(600),
            prefer_linker_edges: true,
        }
    }
}

impl SnippetConfig {
    pub fn limits(&self) -> WindowLimits {
        WindowLimits {
            min_chars: self.min_chars,
            max_chars: self.max_chars,
        }
    }
}

/// Process-level detector settings, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Program and fixed arguments used to run the linker
    pub linker_cmd: Vec<String>,
    pub linker_context: String,
    /// Seconds; `None` disables the timeout
    pub linker_timeout_secs: Option<f64>,
    pub use_linker: bool,
    /// Legacy clustering gap, accepted and logged only
    pub dedup_gap: usize,
    pub snippet: SnippetConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            linker_cmd: split_command(DEFAULT_LINKER_CMD),
            linker_context: "federal".to_string(),
            linker_timeout_secs: Some(1.0),
            use_linker: true,
            dedup_gap: 8,
            snippet: SnippetConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DetectorConfig = toml::from_str(content).context("Invalid detector configuration")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read configuration file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In configuration file {}", path.display()))
    }

    pub fn linker_timeout(&self) -> Option<Duration> {
        secs_to_duration(self.linker_timeout_secs)
    }
}

/// Whitespace-split command line, as accepted by `--linker-cmd`
pub fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

/// Positive finite seconds as a `Duration`; anything else means no timeout
pub fn secs_to_duration(secs: Option<f64>) -> Option<Duration> {
    secs.filter(|s| s.is_finite() && *s > 0.0)
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
}
