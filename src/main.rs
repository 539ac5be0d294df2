use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexaudit::batch::{self, BatchConfig};
use lexaudit::boundary::expand_context;
use lexaudit::config::{split_command, DetectorConfig};
use lexaudit::detector::{scan_with_categories, CitationDetector, DetectOptions, DetectionMetrics};
use lexaudit::discovery::{discover_text_files, DiscoveryConfig};
use lexaudit::Suspect;

#[derive(Parser, Debug)]
#[command(name = "lexaudit")]
#[command(about = "Citation detection and snippet deduplication for Brazilian legal text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect citations in one document and print them as JSON
    Detect {
        /// Plain-text document, or `-` for stdin
        input: String,

        #[command(flatten)]
        detector: DetectorArgs,

        /// Replace each snippet with the surrounding three paragraphs
        #[arg(long)]
        paragraph_context: bool,

        /// Log the pattern category of every regex hit
        #[arg(long)]
        explain: bool,
    },
    /// Detect citations in every *.txt document under a directory
    Batch {
        /// Root directory to scan recursively
        root_dir: PathBuf,

        #[command(flatten)]
        detector: DetectorArgs,

        /// Abort on first error
        #[arg(long)]
        fail_fast: bool,

        /// Suppress console progress bars
        #[arg(long)]
        no_progress: bool,

        /// Documents processed concurrently (defaults to the CPU count)
        #[arg(long)]
        jobs: Option<usize>,

        /// Stats output file path
        #[arg(long, default_value = "run_stats.json")]
        stats_out: PathBuf,
    },
}

/// Detector flags shared by both subcommands; they override the config file
#[derive(ClapArgs, Debug)]
struct DetectorArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the external linker and run the regex scanner only
    #[arg(long)]
    no_linker: bool,

    /// Linker command line, split on whitespace
    #[arg(long)]
    linker_cmd: Option<String>,

    /// Linker context (e.g. federal)
    #[arg(long)]
    context: Option<String>,

    /// Linker timeout in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Bytes kept around a citation before boundary search
    #[arg(long)]
    min_chars: Option<usize>,

    /// Maximum boundary search distance in bytes (0 = unbounded)
    #[arg(long)]
    max_chars: Option<usize>,

    /// Let boundary search move snippet edges past linker spans
    #[arg(long)]
    no_prefer_linker_edges: bool,
}

impl DetectorArgs {
    fn into_config(self) -> Result<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::load(path)?,
            None => DetectorConfig::default(),
        };

        if self.no_linker {
            config.use_linker = false;
        }
        if let Some(cmd) = &self.linker_cmd {
            let parts = split_command(cmd);
            if parts.is_empty() {
                bail!("--linker-cmd must not be empty");
            }
            config.linker_cmd = parts;
        }
        if let Some(context) = self.context {
            config.linker_context = context;
        }
        if let Some(timeout) = self.timeout {
            config.linker_timeout_secs = Some(timeout);
        }
        if let Some(min_chars) = self.min_chars {
            config.snippet.min_chars = min_chars;
        }
        if let Some(max_chars) = self.max_chars {
            config.snippet.max_chars = (max_chars > 0).then_some(max_chars);
        }
        if self.no_prefer_linker_edges {
            config.snippet.prefer_linker_edges = false;
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct DetectOutput {
    suspects: Vec<Suspect>,
    metrics: DetectionMetrics,
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Cannot read stdin")?;
        return Ok(text);
    }
    let path = Path::new(input);
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))
}

async fn run_detect(input: String, detector_args: DetectorArgs, paragraph_context: bool, explain: bool) -> Result<()> {
    let config = detector_args.into_config()?;
    let text = read_input(&input).await?;

    if explain {
        for (suspect, meta) in scan_with_categories(&text)? {
            info!(
                start = suspect.start(),
                end = suspect.end(),
                category = meta.category,
                "Regex hit: {}",
                suspect.suspect_string
            );
        }
    }

    let detector = CitationDetector::new(config);
    let (mut suspects, metrics) = detector
        .detect_with_metrics(&text, &DetectOptions::default())
        .await?;

    if paragraph_context {
        suspects = suspects
            .iter()
            .map(|s| expand_context(&text, s))
            .collect::<Result<Vec<_>>>()?;
    }

    let output = DetectOutput { suspects, metrics };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_batch(
    root_dir: PathBuf,
    detector_args: DetectorArgs,
    fail_fast: bool,
    no_progress: bool,
    jobs: Option<usize>,
    stats_out: PathBuf,
) -> Result<()> {
    let config = detector_args.into_config()?;

    let files = discover_text_files(&root_dir, &DiscoveryConfig::default())?;
    println!("Found {} documents under {}", files.len(), root_dir.display());
    if files.is_empty() {
        return Ok(());
    }

    let batch_config = BatchConfig {
        concurrency: jobs.unwrap_or_else(num_cpus::get).max(1),
        fail_fast,
        show_progress: !no_progress,
    };
    let detector = Arc::new(CitationDetector::new(config));
    let stats = batch::process_files(files, detector, DetectOptions::default(), &batch_config).await?;

    let failed = stats.iter().filter(|s| !s.is_success()).count();
    let total_suspects: usize = stats.iter().map(|s| s.suspects).sum();
    batch::write_stats(&stats_out, &stats).await?;

    println!("Processing complete:");
    println!("  Documents processed: {}", stats.len() - failed);
    if failed > 0 {
        println!("  Documents failed: {failed}");
    }
    println!("  Suspects found: {total_suspects}");
    println!("  Stats written to: {}", stats_out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging on stderr keeps stdout free for the JSON result
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    info!("Starting lexaudit v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Detect {
            input,
            detector,
            paragraph_context,
            explain,
        } => run_detect(input, detector, paragraph_context, explain).await,
        Command::Batch {
            root_dir,
            detector,
            fail_fast,
            no_progress,
            jobs,
            stats_out,
        } => run_batch(root_dir, detector, fail_fast, no_progress, jobs, stats_out).await,
    }
}
