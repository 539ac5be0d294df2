// WHY: Wider paragraph-level context for suspects handed to the identification stage
// Complements the sentence-bounded windows computed by the deduplicator

use std::sync::OnceLock;

use anyhow::Result;
use regex_automata::meta::Regex;

use super::is_hard_break;
use crate::suspect::{Span, Suspect};

/// Sentences grouped per synthetic paragraph when the text has no line breaks
const SENTENCES_PER_PARAGRAPH: usize = 5;

static BLANK_LINE_SEPARATOR: OnceLock<Regex> = OnceLock::new();

fn blank_line_separator() -> Result<&'static Regex> {
    if let Some(separator) = BLANK_LINE_SEPARATOR.get() {
        return Ok(separator);
    }
    let separator = Regex::new(r"\n\s*\n+")?;
    Ok(BLANK_LINE_SEPARATOR.get_or_init(|| separator))
}

/// Paragraphs delimited by blank lines (newline, optional whitespace, newlines)
fn paragraphs_from_blank_lines(text: &str) -> Result<Vec<Span>> {
    let separator = blank_line_separator()?;
    let mut ranges = Vec::new();
    let mut last = 0;

    for mat in separator.find_iter(text) {
        if mat.start() > last {
            ranges.push(Span::new(last, mat.start()));
        }
        last = mat.end();
    }
    if last < text.len() {
        ranges.push(Span::new(last, text.len()));
    }
    if ranges.is_empty() {
        ranges.push(Span::new(0, text.len()));
    }

    Ok(ranges)
}

/// Paragraphs built by grouping sentences, sentence ends being hard breaks
fn paragraphs_from_sentences(text: &str, sentences_per_paragraph: usize) -> Vec<Span> {
    let mut bounds: Vec<usize> = (0..text.len())
        .filter(|&i| is_hard_break(text, i))
        .map(|i| i + 1)
        .collect();
    if bounds.last().map_or(true, |&b| b < text.len()) {
        bounds.push(text.len());
    }

    let mut sentences = Vec::with_capacity(bounds.len());
    let mut prev = 0;
    for end in bounds {
        if end > prev {
            sentences.push(Span::new(prev, end));
            prev = end;
        }
    }
    if sentences.is_empty() {
        return vec![Span::new(0, text.len())];
    }

    sentences
        .chunks(sentences_per_paragraph.max(1))
        .map(|group| Span::new(group[0].start, group[group.len() - 1].end))
        .collect()
}

/// Paragraph ranges of `text`
///
/// Explicit blank lines win when the text has any newline; otherwise paragraphs
/// are runs of five sentences.
pub fn paragraph_ranges(text: &str) -> Result<Vec<Span>> {
    if text.is_empty() {
        return Ok(vec![Span::new(0, 0)]);
    }
    if text.contains('\n') {
        return paragraphs_from_blank_lines(text);
    }
    Ok(paragraphs_from_sentences(text, SENTENCES_PER_PARAGRAPH))
}

/// Paragraph containing `start` plus its previous and next paragraphs, joined by a blank line
pub fn build_three_paragraph_snippet(text: &str, start: Option<usize>) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }
    let Some(start) = start else {
        return Ok(text.trim().to_string());
    };

    let start = start.min(text.len());
    let paragraphs = paragraph_ranges(text)?;
    let center = paragraphs
        .iter()
        .position(|p| {
            (p.start <= start && start < p.end)
                || (start == text.len() && p.start <= start && start <= p.end)
        })
        .unwrap_or(paragraphs.len() - 1);

    let first = center.saturating_sub(1);
    let last = (center + 1).min(paragraphs.len() - 1);

    let pieces: Vec<&str> = paragraphs[first..=last]
        .iter()
        .map(|p| text[p.start..p.end].trim_matches('\n').trim())
        .filter(|segment| !segment.is_empty())
        .collect();

    Ok(pieces.join("\n\n").trim().to_string())
}

/// New suspect whose snippet is the three-paragraph context around its span
///
/// The joined paragraphs are not a single slice of the source, so the
/// snippet range is cleared.
pub fn expand_context(text: &str, suspect: &Suspect) -> Result<Suspect> {
    if text.is_empty() {
        return Ok(suspect.clone());
    }
    let expanded = build_three_paragraph_snippet(text, Some(suspect.start()))?;
    if expanded.is_empty() {
        return Ok(suspect.clone());
    }

    Ok(Suspect {
        context_snippet: expanded,
        snippet_span: None,
        ..suspect.clone()
    })
}
