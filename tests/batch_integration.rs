// Integration tests for batch processing
// WHY: Verifies discovery, per-document reports and failure handling end to end

use std::sync::Arc;

use lexaudit::batch::{process_file, write_stats};
use lexaudit::{
    discover_text_files, process_files, BatchConfig, CitationDetector, DetectOptions, DiscoveryConfig, FileStats,
};

mod integration;
use integration::fixtures::{OPINION_TEXT, PLAIN_TEXT};
use integration::TestFixture;

fn regex_only() -> DetectOptions {
    DetectOptions {
        use_linker: Some(false),
        ..DetectOptions::default()
    }
}

fn quiet(fail_fast: bool) -> BatchConfig {
    BatchConfig {
        concurrency: 2,
        fail_fast,
        show_progress: false,
    }
}

#[tokio::test]
async fn test_batch_writes_one_report_per_document() {
    let fixture = TestFixture::new();
    let opinion = fixture.create_text_file("2024/parecer.txt", OPINION_TEXT);
    let plain = fixture.create_text_file("notas.txt", PLAIN_TEXT);
    fixture.create_text_file("ignorado.md", OPINION_TEXT);

    let files = discover_text_files(&fixture.root_path, &DiscoveryConfig::default()).unwrap();
    assert_eq!(files, vec![opinion.clone(), plain.clone()]);

    let stats = process_files(files, Arc::new(CitationDetector::default()), regex_only(), &quiet(false))
        .await
        .unwrap();
    assert_eq!(stats.len(), 2);
    assert!(stats.iter().all(FileStats::is_success));

    let report = fixture.read_report(&opinion);
    assert_eq!(report.source, opinion.display().to_string());
    assert!(!report.suspects.is_empty());
    assert_eq!(report.metrics.num_final, report.suspects.len());
    assert!(report.suspects.iter().all(|s| s.snippet_span.is_some()));

    let plain_report = fixture.read_report(&plain);
    assert!(plain_report.suspects.is_empty());

    // reports are not picked up as inputs on a second run
    let again = discover_text_files(&fixture.root_path, &DiscoveryConfig::default()).unwrap();
    assert_eq!(again.len(), 2);
}

#[tokio::test]
async fn test_invalid_document_is_recorded_and_batch_continues() {
    let fixture = TestFixture::new();
    fixture.create_text_file("bom.txt", OPINION_TEXT);
    let broken = fixture.create_raw_file("quebrado.txt", &[0xff, 0xfe, 0x00, 0xc3]);

    let files = discover_text_files(&fixture.root_path, &DiscoveryConfig::default()).unwrap();
    let stats = process_files(files, Arc::new(CitationDetector::default()), regex_only(), &quiet(false))
        .await
        .unwrap();

    assert_eq!(stats.len(), 2);
    let failed: Vec<_> = stats.iter().filter(|s| !s.is_success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path, broken.display().to_string());
    assert_eq!(failed[0].status, "failed");
    assert!(failed[0].error.is_some());
    assert!(!lexaudit::discovery::output_path_for(&broken).exists());
}

#[tokio::test]
async fn test_fail_fast_returns_error() {
    let fixture = TestFixture::new();
    fixture.create_raw_file("quebrado.txt", &[0xff, 0xfe]);

    let files = discover_text_files(&fixture.root_path, &DiscoveryConfig::default()).unwrap();
    let result = process_files(files, Arc::new(CitationDetector::default()), regex_only(), &quiet(true)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_process_file_and_stats_output() {
    let fixture = TestFixture::new();
    let source = fixture.create_text_file("parecer.txt", OPINION_TEXT);

    let stats = process_file(&source, &CitationDetector::default(), &regex_only())
        .await
        .unwrap();
    assert!(stats.is_success());
    assert_eq!(stats.bytes, OPINION_TEXT.len() as u64);
    assert_eq!(stats.suspects, fixture.read_report(&source).suspects.len());

    let stats_path = fixture.root_path.join("run_stats.json");
    write_stats(&stats_path, std::slice::from_ref(&stats)).await.unwrap();
    let content = std::fs::read_to_string(&stats_path).unwrap();
    let parsed: Vec<FileStats> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, vec![stats]);
}
