pub mod batch;
pub mod boundary;
pub mod config;
pub mod detector;
pub mod discovery;
pub mod suspect;

// Re-export main types for convenient access
pub use suspect::{DetectorType, IdentifiedCitation, Span, Suspect};

pub use config::{DetectorConfig, SnippetConfig};

pub use detector::{
    deduplicate, run_linker, run_scanner, CitationDetector, DetectOptions, DetectionMetrics, LinkerError,
    LinkerOptions,
};

// Re-export batch processing types for the CLI and benchmarks
pub use batch::{process_files, BatchConfig, FileStats};
pub use discovery::{discover_text_files, DiscoveryConfig};
