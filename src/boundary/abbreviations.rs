// WHY: Centralized abbreviation handling for snippet boundary detection
// A dot closing one of these tokens must never be read as the end of a sentence

use std::collections::HashSet;

/// Legal abbreviations common in PT-BR texts that end a token without ending a sentence
pub const LEGAL_ABBREVIATIONS: &[&str] = &[
    "art.", "arts.", "inc.", "incs.", "al.", "n.", "nº", "no.", "vol.", "v.", "vs.",
];

/// Abbreviation lookup using HashSet for O(1) performance
pub struct AbbreviationChecker {
    abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    /// Create new abbreviation checker with the default legal abbreviation set
    pub fn new() -> Self {
        Self {
            abbreviations: LEGAL_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Check if an already lowercased token is a known abbreviation
    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(token)
    }

    /// Check whether the `.` at byte `dot_pos` closes a known abbreviation
    ///
    /// The token runs from the previous whitespace (exclusive) through the dot
    /// and is compared lowercased.
    pub fn closes_abbreviation(&self, text: &str, dot_pos: usize) -> bool {
        if text.as_bytes().get(dot_pos) != Some(&b'.') {
            return false;
        }

        let head = &text[..=dot_pos];
        let token = match head.rfind(char::is_whitespace) {
            Some(ws) => {
                // skip the whitespace char itself, which may be multi-byte
                let ws_len = head[ws..].chars().next().map_or(1, char::len_utf8);
                &head[ws + ws_len..]
            }
            None => head,
        };

        self.is_abbreviation(&token.to_lowercase())
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
