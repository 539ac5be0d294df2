// WHY: Coverage detector over the compiled reference patterns
// High recall by design of the table; precision is recovered by deduplication against the linker

use anyhow::Result;
use tracing::debug;

use super::patterns::{reference_patterns, GroupMetadata};
use crate::suspect::{DetectorType, Suspect};

/// Regex suspects of `text`, sorted by `(start, end)`, with empty snippets
pub fn run_scanner(text: &str) -> Result<Vec<Suspect>> {
    Ok(scan_with_categories(text)?
        .into_iter()
        .map(|(suspect, _)| suspect)
        .collect())
}

/// Same as [`run_scanner`], paired with the metadata of the fragment that matched
pub fn scan_with_categories(text: &str) -> Result<Vec<(Suspect, &'static GroupMetadata)>> {
    let compiled = reference_patterns()?;

    let mut found = Vec::new();
    for hit in compiled.find_all(text) {
        let Some(meta) = compiled.metadata(hit.pattern) else {
            continue;
        };
        found.push((Suspect::from_text(text, hit.span, DetectorType::Regex), meta));
    }

    found.sort_by_key(|(suspect, _)| suspect.order_key());
    debug!("Regex scanner found {} suspects", found.len());

    Ok(found)
}
