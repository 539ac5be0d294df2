// WHY: Shared data model for both detectors, the deduplicator and the CLI output
// Offsets are byte positions into the source `&str`, always on char boundaries

use serde::{Deserialize, Serialize};

/// Half-open byte interval `[start, end)` over the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span, swapping the bounds when `start > end`
    pub fn new(start: usize, end: usize) -> Self {
        if start > end {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both
    pub fn union(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Clamp both bounds into `[0, len]`
    pub fn clamp_to(&self, len: usize) -> Span {
        Span::new(self.start.min(len), self.end.min(len))
    }
}

/// Which detector produced a suspect. Linker output is trusted over regex output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorType {
    Linker,
    Regex,
}

impl DetectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorType::Linker => "linker",
            DetectorType::Regex => "regex",
        }
    }
}

/// Enrichment payload attached to a suspect, carried through detection untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedCitation {
    pub identified_string: String,
    pub formatted_name: String,
    pub citation_type: String,
    pub confidence: f64,
    pub justification: String,
}

/// Candidate citation span produced by a detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    pub suspect_string: String,
    pub span: Span,
    pub detector_type: DetectorType,
    /// Empty until the deduplicator assigns a window
    #[serde(default)]
    pub context_snippet: String,
    /// Byte range of `context_snippet` inside the source text
    #[serde(default)]
    pub snippet_span: Option<Span>,
    #[serde(default)]
    pub identified_citations: Vec<IdentifiedCitation>,
}

impl Suspect {
    /// Build a suspect from a span of `text`; the literal is copied from the source
    pub fn from_text(text: &str, span: Span, detector_type: DetectorType) -> Self {
        Self {
            suspect_string: text[span.start..span.end].to_string(),
            span,
            detector_type,
            context_snippet: String::new(),
            snippet_span: None,
            identified_citations: Vec::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_linker(&self) -> bool {
        self.detector_type == DetectorType::Linker
    }

    /// Sort key shared by every ordering step of detection
    pub fn order_key(&self) -> (usize, usize) {
        (self.span.start, self.span.end)
    }

    /// New suspect carrying the whitespace-stripped window `text[window]`
    pub fn with_context(&self, text: &str, window: Span) -> Suspect {
        let raw = &text[window.start..window.end];
        let leading = raw.len() - raw.trim_start().len();
        let stripped = raw.trim();
        let snippet_start = window.start + leading;

        Suspect {
            context_snippet: stripped.to_string(),
            snippet_span: Some(Span::new(snippet_start, snippet_start + stripped.len())),
            ..self.clone()
        }
    }
}
