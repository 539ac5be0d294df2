// WHY: Turns the raw linker and regex spans into one suspect per cluster with a non-overlapping snippet
// Pure function of its arguments; cluster state never outlives one call

use tracing::debug;

use crate::boundary::{build_sentence_bounded_range, choose_split_without_overlap};
use crate::config::SnippetConfig;
use crate::suspect::{Span, Suspect};

/// Suspects whose preliminary windows overlap, emitted as one snippet
#[derive(Debug, Clone)]
struct Cluster<'a> {
    members: Vec<&'a Suspect>,
    /// Union of the members' preliminary windows, used only for grouping
    window: Span,
    /// Union of the members' spans; the snippet must contain it
    coverage: Span,
    snippet: Span,
}

impl<'a> Cluster<'a> {
    fn seed(suspect: &'a Suspect, window: Span) -> Self {
        Self {
            members: vec![suspect],
            window,
            coverage: suspect.span,
            snippet: suspect.span,
        }
    }

    fn absorb(&mut self, suspect: &'a Suspect, window: Span) {
        self.members.push(suspect);
        self.window.end = self.window.end.max(window.end);
        self.coverage = self.coverage.union(&suspect.span);
    }

    /// Union of two clusters with the snippet recomputed from the merged coverage
    fn merge(mut self, other: Cluster<'a>, text: &str, options: &SnippetConfig) -> Self {
        self.members.extend(other.members);
        self.window = self.window.union(&other.window);
        self.coverage = self.coverage.union(&other.coverage);
        self.compute_snippet(text, options);
        self
    }

    fn has_left_linker_anchor(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.is_linker() && m.start() == self.coverage.start)
    }

    fn has_right_linker_anchor(&self) -> bool {
        self.members
            .iter()
            .any(|m| m.is_linker() && m.end() == self.coverage.end)
    }

    fn compute_snippet(&mut self, text: &str, options: &SnippetConfig) {
        let lock_left = options.prefer_linker_edges && self.has_left_linker_anchor();
        let lock_right = options.prefer_linker_edges && self.has_right_linker_anchor();
        self.snippet = build_sentence_bounded_range(
            text,
            self.coverage.start,
            self.coverage.end,
            options.limits(),
            lock_left,
            lock_right,
        );
    }

    /// Earliest linker member, else earliest member, by `(start, end)`
    fn representative(&self) -> Option<&'a Suspect> {
        self.members
            .iter()
            .copied()
            .filter(|m| m.is_linker())
            .min_by_key(|m| m.order_key())
            .or_else(|| self.members.iter().copied().min_by_key(|m| m.order_key()))
    }
}

/// Regex suspects that do not overlap any linker span
fn filter_regex_overlapping_linker<'a>(linkers: &[&'a Suspect], regexes: &[&'a Suspect]) -> Vec<&'a Suspect> {
    regexes
        .iter()
        .copied()
        .filter(|r| !linkers.iter().any(|l| l.span.overlaps(&r.span)))
        .collect()
}

/// Group `(window, suspect)` pairs whose windows overlap, walking them left to right
fn build_clusters<'a>(mut windows: Vec<(Span, &'a Suspect)>) -> Vec<Cluster<'a>> {
    windows.sort_by_key(|(window, _)| (window.start, window.end));

    let mut clusters: Vec<Cluster<'a>> = Vec::new();
    for (window, suspect) in windows {
        if let Some(current) = clusters.last_mut().filter(|c| window.start <= c.window.end) {
            current.absorb(suspect, window);
            continue;
        }
        clusters.push(Cluster::seed(suspect, window));
    }
    clusters
}

/// Remove snippet overlaps between neighbouring clusters
///
/// Works as a stack: each incoming cluster is compared with the last accepted
/// one. Overlapping coverage merges the two and the merged cluster is compared
/// again with its new left neighbour. Otherwise the left snippet is trimmed,
/// never below its coverage, and when a sliver of overlap still remains both
/// snippets are cut at one split point between the two coverages.
fn reconcile_clusters<'a>(clusters: Vec<Cluster<'a>>, text: &str, options: &SnippetConfig) -> Vec<Cluster<'a>> {
    let mut accepted: Vec<Cluster<'a>> = Vec::with_capacity(clusters.len());

    for incoming in clusters {
        let mut curr = incoming;
        loop {
            let Some(prev) = accepted.last_mut() else {
                accepted.push(curr);
                break;
            };
            if prev.snippet.end <= curr.snippet.start {
                accepted.push(curr);
                break;
            }

            if prev.coverage.end > curr.coverage.start {
                let Some(prev) = accepted.pop() else {
                    break;
                };
                debug!(
                    "Merging clusters with overlapping coverage {:?} and {:?}",
                    prev.coverage, curr.coverage
                );
                curr = prev.merge(curr, text, options);
                continue;
            }

            prev.snippet.end = prev
                .coverage
                .end
                .max(prev.snippet.end.min(curr.snippet.start));
            if curr.snippet.start < prev.snippet.end {
                let split = choose_split_without_overlap(text, prev.coverage.end, curr.coverage.start, true);
                prev.snippet.end = split;
                curr.snippet.start = split;
            }
            accepted.push(curr);
            break;
        }
    }

    accepted
}

/// One representative per cluster, carrying its snippet, sorted by `(start, end)`
///
/// Regex suspects overlapping a linker suspect are dropped first. Inputs are
/// never modified; every returned suspect is a new value.
pub fn deduplicate(text: &str, linker: &[Suspect], regex: &[Suspect], options: &SnippetConfig) -> Vec<Suspect> {
    if linker.is_empty() && regex.is_empty() {
        return Vec::new();
    }

    let mut linker_sorted: Vec<&Suspect> = linker.iter().collect();
    linker_sorted.sort_by_key(|s| s.order_key());
    let mut regex_sorted: Vec<&Suspect> = regex.iter().collect();
    regex_sorted.sort_by_key(|s| s.order_key());

    let regex_kept = filter_regex_overlapping_linker(&linker_sorted, &regex_sorted);
    debug!(
        "Dropped {} regex suspects shadowed by linker spans",
        regex_sorted.len() - regex_kept.len()
    );

    let limits = options.limits();
    let windows: Vec<(Span, &Suspect)> = linker_sorted
        .iter()
        .chain(regex_kept.iter())
        .map(|&s| {
            let window = build_sentence_bounded_range(text, s.start(), s.end(), limits, false, false);
            (window, s)
        })
        .collect();

    let mut clusters = build_clusters(windows);
    for cluster in &mut clusters {
        cluster.compute_snippet(text, options);
    }
    let cluster_count = clusters.len();
    let clusters = reconcile_clusters(clusters, text, options);
    debug!(
        "Built {} clusters, {} after reconciliation",
        cluster_count,
        clusters.len()
    );

    let mut results: Vec<Suspect> = clusters
        .iter()
        .filter_map(|cluster| {
            cluster
                .representative()
                .map(|rep| rep.with_context(text, cluster.snippet))
        })
        .collect();
    results.sort_by_key(|s| s.order_key());
    results
}
