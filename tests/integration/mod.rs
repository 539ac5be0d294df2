// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use lexaudit::batch::DocumentReport;
use lexaudit::discovery::output_path_for;
use lexaudit::{Span, Suspect};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with plain-text documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Create a document with given content, creating parent directories as needed
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        self.create_raw_file(relative_path, content.as_bytes())
    }

    /// Create a file with arbitrary bytes (e.g. invalid UTF-8)
    pub fn create_raw_file<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Read the report written next to `source`
    pub fn read_report<P: AsRef<Path>>(&self, source: P) -> DocumentReport {
        let path = output_path_for(source.as_ref());
        let content = fs::read_to_string(&path).expect("Failed to read report");
        serde_json::from_str(&content).expect("Report is not valid JSON")
    }
}

/// Span with surrounding whitespace removed
pub fn trimmed_span(text: &str, span: Span) -> Span {
    let slice = &text[span.start..span.end];
    let start = span.start + (slice.len() - slice.trim_start().len());
    Span::new(start, start + slice.trim().len())
}

/// Assert the invariants every deduplication result must satisfy
pub fn assert_dedup_invariants(text: &str, linker: &[Suspect], regex: &[Suspect], output: &[Suspect]) {
    for pair in output.windows(2) {
        assert!(pair[0].order_key() <= pair[1].order_key(), "Output must be sorted by (start, end)");
    }

    let mut snippets: Vec<Span> = output
        .iter()
        .map(|s| s.snippet_span.expect("Every output carries a snippet range"))
        .collect();
    snippets.sort();
    for pair in snippets.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "Snippets {:?} and {:?} overlap",
            pair[0],
            pair[1]
        );
    }

    for suspect in output {
        let snippet = suspect.snippet_span.expect("Every output carries a snippet range");
        assert!(
            snippet.contains(&trimmed_span(text, suspect.span)),
            "Snippet {:?} must contain its representative {:?}",
            snippet,
            suspect.span
        );
        assert_eq!(suspect.context_snippet, &text[snippet.start..snippet.end]);
    }

    // every surviving input lies inside exactly one snippet
    for member in linker.iter().chain(regex.iter()) {
        let shadowed = !member.is_linker() && linker.iter().any(|l| l.span.overlaps(&member.span));
        let core = trimmed_span(text, member.span);
        if shadowed || core.is_empty() {
            continue;
        }
        let owners = snippets.iter().filter(|s| s.contains(&core)).count();
        assert_eq!(owners, 1, "Suspect {:?} must belong to exactly one snippet", member.span);
    }

    // linker precedence
    for suspect in output {
        if !suspect.is_linker() {
            assert!(
                !linker.iter().any(|l| l.span.overlaps(&suspect.span)),
                "Regex suspect {:?} overlaps a linker span",
                suspect.span
            );
        }
    }
}
