// WHY: Unified regex for the citation scanner, compiled once from labelled fragments
// Fragment order is match priority, like a single alternation built from the table

use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use regex_automata::{
    meta::Regex,
    util::syntax,
    Anchored, Input,
};
use tracing::{debug, info};

use crate::suspect::Span;

pub mod loose;
pub mod strict;

/// Confidence tag of the single group the scanner compiles
pub const REFERENCE_CONFIDENCE: &str = "reference";

/// Court acronyms accepted by [`Guard::CourtWithin`]
const COURT_LOOKAHEAD: &str = r"[^.]{0,80}\b(?:STF|STJ|TST|TSE|TRF|CNJ)\b";

/// Words that make `MP do/da ...` a public body instead of a provisional measure
const INSTITUTION_WORDS: &[&str] = &[
    "estado",
    "distrito",
    "município",
    "municipio",
    "ministério",
    "ministerio",
    "público",
    "publico",
    "procuradoria",
    "justiça",
    "justica",
];

const CONNECTORS: &[&str] = &["da", "do", "dos", "das"];

// Raised from the default so the full table fits in one NFA
const NFA_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Context condition checked after a fragment matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// A court acronym must follow within the next characters without crossing a `.`
    /// The window length is fixed by the compiled court lookahead (80 characters)
    CourtWithin,
    /// Reject `MP do Estado`-like matches; optionally cut the match before a later institution word
    NoInstitutionAfterMp { truncate_tail: bool },
}

/// One labelled fragment of the pattern table
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub label: &'static str,
    pub pattern: &'static str,
    pub guard: Option<Guard>,
}

impl PatternSpec {
    pub const fn plain(label: &'static str, pattern: &'static str) -> Self {
        Self {
            label,
            pattern,
            guard: None,
        }
    }

    pub const fn guarded(label: &'static str, pattern: &'static str, guard: Guard) -> Self {
        Self {
            label,
            pattern,
            guard: Some(guard),
        }
    }
}

/// Metadata of a compiled fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMetadata {
    /// `<confidence>__<label>`
    pub group_name: String,
    pub category: &'static str,
    pub confidence: &'static str,
}

/// Accepted match of the compiled set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternHit {
    pub span: Span,
    /// Index into [`CompiledPatterns::metadata`]
    pub pattern: usize,
}

/// Reference table: strict families first, loose families after
pub const REFERENCE_PATTERN_SPECS: &[PatternSpec] = &[
    PatternSpec::plain("constitution", strict::CONSTITUTION),
    PatternSpec::plain("law_or_code", strict::LAW_LIKE),
    PatternSpec::plain("code_name", strict::CODE_STATUTE),
    PatternSpec::plain("sumula", strict::SUMULA),
    PatternSpec::plain("jurisprudence", strict::JURISPRUDENCE),
    PatternSpec::plain("cnj_number", strict::CNJ_NUMBER),
    PatternSpec::plain("other_act", strict::OTHER_ACT),
    PatternSpec::guarded(
        "law_alias",
        loose::LAW_ALIAS,
        Guard::NoInstitutionAfterMp { truncate_tail: true },
    ),
    PatternSpec::plain("generic_constitution", loose::GENERIC_CONSTITUTION),
    PatternSpec::plain("generic_article", loose::GENERIC_ARTICLE),
    PatternSpec::plain("generic_law_number", loose::GENERIC_LAW_REFERENCE),
    PatternSpec::plain("generic_law_collection", loose::GENERIC_LAW_COLLECTION),
    PatternSpec::plain("generic_case", loose::GENERIC_CASE),
    PatternSpec::plain("generic_code_name", loose::GENERIC_CODE),
    PatternSpec::plain("generic_other_act", loose::GENERIC_OTHER_ACT),
    PatternSpec::plain("generic_sumula_org", loose::GENERIC_SUMULA_ORG),
    PatternSpec::plain("urn_reference", strict::URN_LEXML),
    PatternSpec::guarded(
        "mp_generic_year",
        loose::MP_GENERIC_YEAR,
        Guard::NoInstitutionAfterMp { truncate_tail: false },
    ),
    PatternSpec::plain("in_abbr", loose::IN_ABBR),
    PatternSpec::plain("org_sigla_number", loose::ORG_SIGLA_NUMBER),
    PatternSpec::plain("tema_rg", loose::TEMA_RG),
    PatternSpec::plain("stj_recurso_repetitivo", loose::STJ_RECURSO_REPETITIVO),
    PatternSpec::plain("sumula_abbr", loose::SUMULA_ABBR),
    PatternSpec::plain("sumula_list_numbers", loose::SUMULA_LIST_NUMBERS),
    PatternSpec::plain("sumula_generic_topic", loose::SUMULA_GENERIC_TOPIC),
    PatternSpec::plain("sumula_dirty", loose::SUMULA_DIRTY),
    PatternSpec::plain("oj_tst", loose::OJ_TST),
    PatternSpec::plain("council_resolution_generic", loose::COUNCIL_RESOLUTION_GENERIC),
    PatternSpec::plain("sumula_generic", loose::SUMULA_GENERIC),
    PatternSpec::plain("resolution_generic_org", loose::RESOLUTION_GENERIC_ORG),
    PatternSpec::plain("regimento_interno", loose::REGIMENTO_INTERNO),
    PatternSpec::plain("regimento_sigla", loose::REGIMENTO_SIGLA),
    PatternSpec::plain("reg_interno_abbr", loose::REG_INTERNO_ABBR),
    PatternSpec::plain("other_act_joined_sigla_num", loose::OTHER_ACT_JOINED_SIGLA_NUM),
    PatternSpec::plain("pec_generic", loose::PEC_GENERIC),
    PatternSpec::plain("pl_generic", loose::PL_GENERIC),
    PatternSpec::plain("legislative_proposal_number", loose::LEGISLATIVE_PROPOSAL_NUMBER),
    PatternSpec::guarded(
        "sumula_generic_near_court",
        loose::SUMULA_GENERIC_NEAR_COURT,
        Guard::CourtWithin,
    ),
    PatternSpec::plain("judicial_decision_number", loose::JUDICIAL_DECISION_NUMBER),
    PatternSpec::plain("official_manual", loose::OFFICIAL_MANUAL),
    PatternSpec::guarded(
        "oj_generic_near_court",
        loose::OJ_GENERIC_NEAR_COURT,
        Guard::CourtWithin,
    ),
    PatternSpec::plain("parecer_org", loose::PARECER_ORG),
    PatternSpec::plain("parecer_number_org_suffix", loose::PARECER_NUMBER_ORG_SUFFIX),
    PatternSpec::plain("note_tecnica_generic", loose::NOTA_TECNICA_GENERIC),
    PatternSpec::plain("estatuto_social", loose::ESTATUTO_SOCIAL),
    PatternSpec::plain("regulamento_interno", loose::REGULAMENTO_INTERNO),
    PatternSpec::plain("policy_privacy", loose::POLICY_PRIVACY),
    PatternSpec::plain("doctrine_citation", loose::DOCTRINE_CITATION),
    PatternSpec::plain("parecer_generic_org", loose::PARECER_GENERIC_ORG),
    PatternSpec::plain("nota_tecnica_abbr", loose::NOTA_TECNICA_ABBR),
    PatternSpec::plain("edital_generic", loose::EDITAL_GENERIC),
    PatternSpec::plain("estatuto_generic", loose::ESTATUTO_GENERIC),
    PatternSpec::plain("article_list", loose::ARTICLE_LIST),
];

fn syntax_config() -> syntax::Config {
    syntax::Config::new()
        .case_insensitive(true)
        .ignore_whitespace(true)
        .multi_line(true)
        .unicode(true)
}

fn build_regex<P: AsRef<str>>(patterns: &[P]) -> Result<Regex> {
    Regex::builder()
        .configure(Regex::config().nfa_size_limit(Some(NFA_SIZE_LIMIT)))
        .syntax(syntax_config())
        .build_many(patterns)
        .map_err(|e| anyhow!("failed to compile citation patterns: {}", e))
}

/// Multi-pattern regex plus per-fragment regexes used to retry after a guard rejection
pub struct CompiledPatterns {
    combined: Regex,
    singles: Vec<Regex>,
    guards: Vec<Option<Guard>>,
    court: Regex,
    metadata: Vec<GroupMetadata>,
}

/// Compile `(confidence, table)` groups into one prioritized pattern set
pub fn compile_pattern_groups(groups: &[(&'static str, &[PatternSpec])]) -> Result<CompiledPatterns> {
    let mut fragments = Vec::new();
    let mut guards = Vec::new();
    let mut metadata = Vec::new();

    for (confidence, specs) in groups {
        for spec in specs.iter() {
            fragments.push(spec.pattern);
            guards.push(spec.guard);
            metadata.push(GroupMetadata {
                group_name: format!("{}__{}", confidence, spec.label),
                category: spec.label,
                confidence: *confidence,
            });
        }
    }
    if fragments.is_empty() {
        return Err(anyhow!("no citation patterns to compile"));
    }

    info!("Compiling {} citation patterns", fragments.len());
    let combined = build_regex(&fragments)?;

    let singles = fragments
        .iter()
        .zip(&metadata)
        .map(|(fragment, meta)| {
            build_regex(&[*fragment])
                .map_err(|e| anyhow!("pattern '{}' is invalid: {}", meta.group_name, e))
        })
        .collect::<Result<Vec<_>>>()?;

    let court = build_regex(&[COURT_LOOKAHEAD])?;
    debug!("Compiled pattern set with {} groups", metadata.len());

    Ok(CompiledPatterns {
        combined,
        singles,
        guards,
        court,
        metadata,
    })
}

static REFERENCE_PATTERNS: OnceLock<CompiledPatterns> = OnceLock::new();

/// Process-wide reference pattern set, compiled on first use
pub fn reference_patterns() -> Result<&'static CompiledPatterns> {
    if let Some(compiled) = REFERENCE_PATTERNS.get() {
        return Ok(compiled);
    }
    let compiled = compile_pattern_groups(&[(REFERENCE_CONFIDENCE, REFERENCE_PATTERN_SPECS)])?;
    // a concurrent initializer may have won; either value is equivalent
    Ok(REFERENCE_PATTERNS.get_or_init(|| compiled))
}

impl CompiledPatterns {
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    pub fn metadata(&self, pattern: usize) -> Option<&GroupMetadata> {
        self.metadata.get(pattern)
    }

    /// All accepted, non-overlapping matches, left to right
    pub fn find_all(&self, text: &str) -> Vec<PatternHit> {
        let mut hits = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let input = Input::new(text).span(pos..text.len());
            let Some(found) = self.combined.search(&input) else {
                break;
            };
            let start = found.start();

            match self.accept_at(text, start, found.pattern().as_usize(), found.end()) {
                Some(hit) => {
                    pos = if hit.span.end > start {
                        hit.span.end
                    } else {
                        next_char_boundary(text, start)
                    };
                    hits.push(hit);
                }
                None => pos = next_char_boundary(text, start),
            }
        }

        hits
    }

    /// First acceptable match starting exactly at `start`, trying `first` and then lower priorities
    fn accept_at(&self, text: &str, start: usize, first: usize, first_end: usize) -> Option<PatternHit> {
        if let Some(span) = self.check_guard(text, first, Span::new(start, first_end)) {
            return Some(PatternHit { span, pattern: first });
        }

        for pattern in first + 1..self.singles.len() {
            let input = Input::new(text)
                .span(start..text.len())
                .anchored(Anchored::Yes);
            let Some(found) = self.singles[pattern].search(&input) else {
                continue;
            };
            if let Some(span) = self.check_guard(text, pattern, Span::new(start, found.end())) {
                debug!(
                    "Guard fallback at {}: {} -> {}",
                    start, self.metadata[first].category, self.metadata[pattern].category
                );
                return Some(PatternHit { span, pattern });
            }
        }

        None
    }

    fn check_guard(&self, text: &str, pattern: usize, span: Span) -> Option<Span> {
        if span.is_empty() {
            return None;
        }
        match self.guards[pattern] {
            None => Some(span),
            Some(Guard::CourtWithin) => {
                let input = Input::new(text)
                    .span(span.end..text.len())
                    .anchored(Anchored::Yes);
                self.court.is_match(input).then_some(span)
            }
            Some(Guard::NoInstitutionAfterMp { truncate_tail }) => {
                check_mp_institution(text, span, truncate_tail)
            }
        }
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

/// Whitespace-separated words of `text[from..]` with absolute byte spans
fn words_from(text: &str, from: usize) -> impl Iterator<Item = (Span, &str)> + '_ {
    let tail = &text[from..];
    tail.split_whitespace().map(move |word| {
        let offset = word.as_ptr() as usize - tail.as_ptr() as usize;
        let start = from + offset;
        (Span::new(start, start + word.len()), word)
    })
}

/// Leading word characters, lowercased (`Estado,` -> `estado`)
fn word_stem(word: &str) -> String {
    word.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

fn is_institution(word: &str) -> bool {
    INSTITUTION_WORDS.contains(&word_stem(word).as_str())
}

fn check_mp_institution(text: &str, span: Span, truncate_tail: bool) -> Option<Span> {
    let words: Vec<(Span, &str)> = words_from(text, span.start).take(8).collect();
    let Some((_, lead)) = words.first() else {
        return Some(span);
    };
    let connector_at = if lead.eq_ignore_ascii_case("mp") { 1 } else { 2 };

    let connector = words.get(connector_at).map(|(_, w)| w.to_lowercase());
    if !connector.is_some_and(|c| CONNECTORS.contains(&c.as_str())) {
        return Some(span);
    }
    match words.get(connector_at + 1) {
        Some((_, name)) if is_institution(name) => return None,
        Some(_) => {}
        None => return Some(span),
    }
    if !truncate_tail {
        return Some(span);
    }

    // keep the words before the first institution word inside the match
    let mut end = span.end;
    for pair in words[connector_at + 1..].windows(2) {
        let (prev, (word_span, word)) = (pair[0].0, pair[1]);
        if word_span.start >= span.end {
            break;
        }
        if is_institution(word) {
            end = prev.end.min(span.end);
            break;
        }
    }
    Some(Span::new(span.start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(text: &str) -> Vec<(&'static str, String)> {
        let compiled = reference_patterns().unwrap();
        compiled
            .find_all(text)
            .into_iter()
            .map(|hit| {
                (
                    compiled.metadata(hit.pattern).unwrap().category,
                    text[hit.span.start..hit.span.end].to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_reference_set_compiles_with_metadata() {
        let compiled = reference_patterns().unwrap();
        assert_eq!(compiled.len(), REFERENCE_PATTERN_SPECS.len());

        let first = compiled.metadata(0).unwrap();
        assert_eq!(first.group_name, "reference__constitution");
        assert_eq!(first.category, "constitution");
        assert_eq!(first.confidence, "reference");
        assert!(compiled.metadata(compiled.len()).is_none());
    }

    #[test]
    fn test_strict_families_win_by_priority() {
        let hits = categories("Conforme a Lei nº 8.112/90 e a CF/88.");
        assert_eq!(hits[0], ("law_or_code", "Lei nº 8.112/90".to_string()));
        assert_eq!(hits[1].0, "constitution");
        assert_eq!(hits[1].1, "CF/88");
    }

    #[test]
    fn test_cnj_number_and_urn() {
        let text = "Processo 0001234-56.2020.8.26.0100 e urn:lex:br:federal:lei:1990-12-11;8112 citados";
        let hits = categories(text);
        assert!(hits.contains(&("cnj_number", "0001234-56.2020.8.26.0100".to_string())));
        // the URN stops at `;`
        assert!(hits.contains(&("urn_reference", "urn:lex:br:federal:lei:1990-12-11".to_string())));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let hits = categories("ver súmula 331 do tst");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "sumula");
        assert_eq!(hits[0].1, "súmula 331 do tst");
    }

    #[test]
    fn test_generic_article_requires_word_start() {
        let hits = categories("o artista 5 pintou");
        assert!(hits.iter().all(|(category, _)| *category != "generic_article"));

        let hits = categories("nos termos do art. 5");
        assert!(hits.iter().any(|(_, s)| s == "art. 5"));
    }

    #[test]
    fn test_law_alias_nickname_accepted() {
        let hits = categories("A MP do Bem trouxe incentivos");
        assert_eq!(hits[0].0, "law_alias");
        assert!(hits[0].1.starts_with("MP do Bem"));
    }

    #[test]
    fn test_mp_institution_is_not_a_law_alias() {
        let hits = categories("O MP do Estado recorreu");
        assert!(hits.iter().all(|(category, _)| *category != "law_alias"));

        let hits = categories("denúncia do MP da Justiça Militar");
        assert!(hits.iter().all(|(category, _)| *category != "law_alias"));
    }

    #[test]
    fn test_law_alias_cut_before_later_institution() {
        let hits = categories("MP da Liberdade Econômica do Estado");
        assert_eq!(hits[0], ("law_alias", "MP da Liberdade Econômica do".to_string()));
    }

    #[test]
    fn test_mp_generic_year_guard() {
        let hits = categories("a MP qualquer de 2019 foi editada");
        assert!(hits.iter().any(|(c, s)| *c == "mp_generic_year" && s == "MP qualquer de 2019"));

        let hits = categories("MP do Estado de 2019");
        assert!(hits.iter().all(|(c, _)| *c != "mp_generic_year" && *c != "law_alias"));
    }

    #[test]
    fn test_sumula_near_court_guard() {
        let hits = categories("As súmulas recentes do STJ");
        assert_eq!(hits, vec![("sumula_generic_near_court", "súmulas".to_string())]);

        assert!(categories("As súmulas. O STJ").is_empty());
    }

    #[test]
    fn test_oj_generic_needs_court_nearby() {
        let near = categories("orientações jurisprudenciais consolidadas do TST");
        assert!(near.iter().any(|(c, _)| *c == "oj_generic_near_court" || *c == "oj_tst"));

        let far = categories("Orientações jurisprudenciais. O TST decidiu");
        assert!(far.iter().all(|(c, _)| *c != "oj_generic_near_court"));
    }

    #[test]
    fn test_court_guard_rejects_across_period() {
        let compiled = reference_patterns().unwrap();
        // unguarded patterns pass through
        assert!(compiled.check_guard("CF. TST", 0, Span::new(0, 2)).is_some());

        let court_index = REFERENCE_PATTERN_SPECS
            .iter()
            .position(|s| s.guard == Some(Guard::CourtWithin))
            .unwrap();
        assert!(compiled
            .check_guard("Súmulas. STF", court_index, Span::new(0, 8))
            .is_none());
        assert!(compiled
            .check_guard("Súmulas do STF", court_index, Span::new(0, 8))
            .is_some());
    }

    #[test]
    fn test_generic_other_act_rn_number() {
        let hits = categories("RN 465/2021");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, "RN 465/2021");
    }

    #[test]
    fn test_custom_group_compilation() {
        static SPECS: &[PatternSpec] = &[
            PatternSpec::plain("alpha", r"abc"),
            PatternSpec::plain("alpha_long", r"abc\d+"),
        ];
        let compiled = compile_pattern_groups(&[("test", SPECS)]).unwrap();
        assert_eq!(compiled.metadata(1).unwrap().group_name, "test__alpha_long");

        // leftmost-first: the earlier fragment wins at the same start
        let hits = compiled.find_all("xx ABC123");
        assert_eq!(hits, vec![PatternHit { span: Span::new(3, 6), pattern: 0 }]);
    }

    #[test]
    fn test_invalid_or_empty_groups_fail() {
        static BAD: &[PatternSpec] = &[PatternSpec::plain("bad", r"(unclosed")];
        assert!(compile_pattern_groups(&[("test", BAD)]).is_err());
        assert!(compile_pattern_groups(&[]).is_err());
    }

    #[test]
    fn test_no_matches_in_plain_prose() {
        assert!(categories("").is_empty());
        assert!(categories("o gato subiu no telhado").is_empty());
    }
}
