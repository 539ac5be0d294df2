// WHY: Punctuation-driven boundary search used to keep snippets from cutting sentences
// Pure functions over byte offsets; no NLP model involved

use std::sync::OnceLock;

use crate::suspect::Span;

pub mod abbreviations;
pub mod paragraphs;

pub use abbreviations::AbbreviationChecker;
pub use paragraphs::{build_three_paragraph_snippet, expand_context, paragraph_ranges};

/// Size limits for a sentence-bounded window, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimits {
    /// Distance from the anchor where the boundary search starts
    pub min_chars: usize,
    /// Maximum distance the search may travel; `None` or `Some(0)` scans to the document edge
    pub max_chars: Option<usize>,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            min_chars: 120,
            max_chars: Some(600),
        }
    }
}

static ABBREVIATIONS: OnceLock<AbbreviationChecker> = OnceLock::new();

fn abbreviations() -> &'static AbbreviationChecker {
    ABBREVIATIONS.get_or_init(AbbreviationChecker::new)
}

/// `.` between two digits, as in `9.784`
fn is_decimal_point(text: &str, pos: usize) -> bool {
    if text.as_bytes().get(pos) != Some(&b'.') {
        return false;
    }
    let prev = text[..pos].chars().next_back();
    let next = text[pos + 1..].chars().next();
    matches!((prev, next), (Some(p), Some(n)) if p.is_numeric() && n.is_numeric())
}

/// Strong sentence boundary at byte `pos`
///
/// `!` and `?` always qualify. A `.` qualifies unless it is a decimal point or
/// closes a known abbreviation. The second `\n` of a blank line is a paragraph break.
pub fn is_hard_break(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    match bytes.get(pos) {
        Some(b'!') | Some(b'?') => true,
        Some(b'.') => !is_decimal_point(text, pos) && !abbreviations().closes_abbreviation(text, pos),
        Some(b'\n') => pos > 0 && bytes[pos - 1] == b'\n',
        _ => false,
    }
}

/// Weak clause boundary at byte `pos`: `;`, `:` or a lone newline
pub fn is_soft_break(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    match bytes.get(pos) {
        Some(b';') | Some(b':') => true,
        Some(b'\n') => !(pos > 0 && bytes[pos - 1] == b'\n'),
        _ => false,
    }
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn ceil_char_boundary(text: &str, mut pos: usize) -> usize {
    pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}

fn effective_limit(limit: Option<usize>) -> Option<usize> {
    limit.filter(|&l| l > 0)
}

/// Scan backward from `anchor - min_chars` to `anchor - max_backtrack`
///
/// Returns the position right after the first hard break met, else right after
/// the first soft break met, else the backtrack floor.
pub fn find_left_boundary(
    text: &str,
    anchor: usize,
    min_chars: usize,
    max_backtrack: Option<usize>,
) -> usize {
    if text.is_empty() {
        return 0;
    }
    let anchor = floor_char_boundary(text, anchor);
    let target = anchor.saturating_sub(min_chars);
    let floor = match effective_limit(max_backtrack) {
        Some(limit) => ceil_char_boundary(text, anchor.saturating_sub(limit)),
        None => 0,
    };

    let mut best_soft = None;
    let mut i = target;
    while i >= floor {
        if is_hard_break(text, i) {
            return i + 1;
        }
        if best_soft.is_none() && is_soft_break(text, i) {
            best_soft = Some(i + 1);
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    best_soft.unwrap_or(floor)
}

/// Scan forward from `anchor + min_chars` up to `anchor + max_ahead`
///
/// Mirror of [`find_left_boundary`]; falls back to the look-ahead ceiling.
pub fn find_right_boundary(
    text: &str,
    anchor: usize,
    min_chars: usize,
    max_ahead: Option<usize>,
) -> usize {
    if text.is_empty() {
        return 0;
    }
    let len = text.len();
    let anchor = ceil_char_boundary(text, anchor);
    let target = anchor.saturating_add(min_chars).min(len);
    let ceil = match effective_limit(max_ahead) {
        Some(limit) => floor_char_boundary(text, anchor.saturating_add(limit).min(len)),
        None => len,
    };

    let mut best_soft = None;
    for i in target..ceil {
        if is_hard_break(text, i) {
            return i + 1;
        }
        if best_soft.is_none() && is_soft_break(text, i) {
            best_soft = Some(i + 1);
        }
    }

    best_soft.unwrap_or(ceil)
}

/// Sentence-aware window around `[start, end)`
///
/// A locked edge stays exactly on the span; an unlocked edge is searched for.
/// The result always contains the (clamped) input span.
pub fn build_sentence_bounded_range(
    text: &str,
    start: usize,
    end: usize,
    limits: WindowLimits,
    lock_left: bool,
    lock_right: bool,
) -> Span {
    if text.is_empty() {
        return Span::new(0, 0);
    }
    let span = Span::new(start, end).clamp_to(text.len());
    let start = floor_char_boundary(text, span.start);
    let end = ceil_char_boundary(text, span.end);

    let left = if lock_left {
        start
    } else {
        find_left_boundary(text, start, limits.min_chars, limits.max_chars)
    };
    let right = if lock_right {
        end
    } else {
        find_right_boundary(text, end, limits.min_chars, limits.max_chars)
    };

    Span::new(left.min(start), right.max(end))
}

/// Pick a cut point inside `[left_min, right_max)` for two windows that must not overlap
///
/// Prefers a hard break, then a soft break (the rightmost ones when
/// `prefer_rightmost`, else the leftmost), then whitespace at or before the
/// midpoint. Falls back to `right_max`, so a split always exists.
pub fn choose_split_without_overlap(
    text: &str,
    left_min: usize,
    right_max: usize,
    prefer_rightmost: bool,
) -> usize {
    let left_min = ceil_char_boundary(text, left_min);
    let right_max = floor_char_boundary(text, right_max).max(left_min);

    let mut best_hard = None;
    let mut best_soft = None;
    for i in left_min..right_max {
        if is_hard_break(text, i) {
            if prefer_rightmost || best_hard.is_none() {
                best_hard = Some(i + 1);
            }
        } else if is_soft_break(text, i) && (prefer_rightmost || best_soft.is_none()) {
            best_soft = Some(i + 1);
        }
    }
    if let Some(split) = best_hard.or(best_soft) {
        return split;
    }

    let mid = floor_char_boundary(text, (left_min + right_max) / 2);
    let upper = text[mid..].chars().next().map_or(mid, |c| mid + c.len_utf8());
    text[left_min..upper]
        .char_indices()
        .rev()
        .map(|(offset, ch)| (left_min + offset, ch))
        .take_while(|&(pos, _)| pos > left_min)
        .find(|&(_, ch)| ch.is_whitespace())
        .map_or(right_max, |(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_dot_is_not_hard_break() {
        let text = "Nos termos do art. 5º da CF, todos são iguais.";
        let dot = text.find("art.").unwrap() + 3;
        assert!(!is_hard_break(text, dot));
        assert!(is_hard_break(text, text.len() - 1));
    }

    #[test]
    fn test_decimal_point_is_not_hard_break() {
        let text = "O valor de R$ 9.784,00 foi pago.";
        let dot = text.find("9.7").unwrap() + 1;
        assert!(!is_hard_break(text, dot));
    }

    #[test]
    fn test_newline_classification() {
        let text = "a\nb\n\nc";
        assert!(is_soft_break(text, 1));
        assert!(!is_hard_break(text, 1));
        assert!(is_soft_break(text, 3));
        assert!(is_hard_break(text, 4));
        assert!(!is_soft_break(text, 4));
        assert!(is_soft_break("x; y", 1));
        assert!(is_soft_break("x: y", 1));
    }

    #[test]
    fn test_out_of_range_positions_are_not_breaks() {
        assert!(!is_hard_break("abc.", 10));
        assert!(!is_soft_break("abc;", 10));
    }

    #[test]
    fn test_find_left_boundary_prefers_hard_break() {
        let text = "Primeira frase. Segunda parte; terceira parte com a citação";
        let anchor = text.find("citação").unwrap();
        let left = find_left_boundary(text, anchor, 0, None);
        // the soft break is closer, but the hard break wins
        assert_eq!(left, text.find("Primeira frase.").unwrap() + "Primeira frase.".len());
    }

    #[test]
    fn test_find_left_boundary_falls_back_to_soft_then_floor() {
        let text = "alpha; beta gamma delta";
        let anchor = text.find("delta").unwrap();
        assert_eq!(find_left_boundary(text, anchor, 0, None), 6);

        let text = "alpha beta gamma delta";
        let anchor = text.find("delta").unwrap();
        assert_eq!(find_left_boundary(text, anchor, 0, Some(5)), anchor - 5);
        assert_eq!(find_left_boundary(text, anchor, 0, None), 0);
    }

    #[test]
    fn test_find_right_boundary_mirrors_left() {
        let text = "citação aqui; continua. Fim";
        assert_eq!(find_right_boundary(text, 0, 0, None), text.find('.').unwrap() + 1);

        let text = "citação aqui; continua sem ponto";
        assert_eq!(find_right_boundary(text, 0, 0, None), text.find(';').unwrap() + 1);

        let text = "sem quebra nenhuma";
        assert_eq!(find_right_boundary(text, 0, 0, Some(4)), 4);
        assert_eq!(find_right_boundary(text, 0, 0, None), text.len());
    }

    #[test]
    fn test_boundaries_stay_in_bounds_and_are_pure() {
        let text = "Lei nº 8.112. Art. 5º; CF/88!\n\nNovo parágrafo ção";
        for anchor in 0..=text.len() + 3 {
            for min_chars in [0, 3, 120] {
                for limit in [None, Some(0), Some(7), Some(600)] {
                    let left = find_left_boundary(text, anchor, min_chars, limit);
                    let right = find_right_boundary(text, anchor, min_chars, limit);
                    assert!(left <= text.len() && right <= text.len());
                    assert!(text.is_char_boundary(left) && text.is_char_boundary(right));
                    assert_eq!(left, find_left_boundary(text, anchor, min_chars, limit));
                    assert_eq!(right, find_right_boundary(text, anchor, min_chars, limit));
                }
            }
        }
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(find_left_boundary("", 5, 10, None), 0);
        assert_eq!(find_right_boundary("", 5, 10, None), 0);
        assert_eq!(
            build_sentence_bounded_range("", 0, 3, WindowLimits::default(), false, false),
            Span::new(0, 0)
        );
    }

    #[test]
    fn test_bounded_range_contains_span_and_honors_locks() {
        let text = "Uma frase antes. Conforme a Lei 8.112/1990, o servidor. Depois.";
        let start = text.find("Lei").unwrap();
        let end = start + "Lei 8.112/1990".len();
        let limits = WindowLimits { min_chars: 0, max_chars: Some(600) };

        let open = build_sentence_bounded_range(text, start, end, limits, false, false);
        assert_eq!(&text[open.start..open.end], " Conforme a Lei 8.112/1990, o servidor.");

        let locked = build_sentence_bounded_range(text, start, end, limits, true, true);
        assert_eq!(locked, Span::new(start, end));

        // reversed input is normalized
        let swapped = build_sentence_bounded_range(text, end, start, limits, false, false);
        assert_eq!(swapped, open);
    }

    #[test]
    fn test_min_chars_skips_nearby_breaks() {
        let text = "A. B. C. D. citação";
        let anchor = text.find("citação").unwrap();
        let left = find_left_boundary(text, anchor, 5, None);
        assert!(left <= anchor - 5 + 1);
    }

    #[test]
    fn test_choose_split_prefers_hard_then_soft_then_space() {
        let text = "aaa. bbb. ccc; ddd";
        assert_eq!(choose_split_without_overlap(text, 0, text.len(), true), 9);
        assert_eq!(choose_split_without_overlap(text, 0, text.len(), false), 4);

        let text = "aaa; bbb; ccc";
        assert_eq!(choose_split_without_overlap(text, 0, text.len(), true), 9);

        let text = "aaaa bbbb cccc";
        let split = choose_split_without_overlap(text, 0, text.len(), true);
        assert_eq!(split, 4);

        let text = "aaaaaaaaaa";
        assert_eq!(choose_split_without_overlap(text, 2, 8, true), 8);
    }

    #[test]
    fn test_multibyte_limits_snap_to_char_boundaries() {
        let text = "ção ção ção ção";
        let anchor = text.len();
        for limit in 1..8 {
            let left = find_left_boundary(text, anchor, 0, Some(limit));
            assert!(text.is_char_boundary(left));
            let right = find_right_boundary(text, 0, 0, Some(limit));
            assert!(text.is_char_boundary(right));
        }
    }
}
