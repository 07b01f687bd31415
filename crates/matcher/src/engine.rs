use std::cmp::Ordering;
use std::collections::HashMap;

use index::{Index, MatchField};
use normalize::normalize;

use crate::types::{MatchConfig, MatchError, MatchResult};

/// Resolves free-text queries against a built [`Index`].
///
/// Construction validates the [`MatchConfig`] once; after that, resolution
/// is infallible — absence of a match is an empty result list, never an
/// error.
#[derive(Debug)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Construct a matcher with explicit configuration.
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Resolve `query` against `index`, normalizing it with the index's own
    /// normalization config first.
    pub fn resolve(&self, query: &str, index: &Index) -> Vec<MatchResult> {
        let normalized = normalize(query, index.normalize_config());
        self.resolve_normalized(&normalized, index)
    }

    /// Resolve an already-normalized query. Callers that normalize up front
    /// (e.g. to derive a cache key) use this to avoid doing the work twice;
    /// the string must have been produced with the index's own config.
    pub fn resolve_normalized(&self, normalized: &str, index: &Index) -> Vec<MatchResult> {
        if normalized.is_empty() {
            return Vec::new();
        }

        // Exact pass short-circuits all scoring.
        if let Some(postings) = index.postings(normalized) {
            let mut results: Vec<MatchResult> = postings
                .iter()
                .map(|p| MatchResult {
                    record_id: p.record_id.clone(),
                    score: 1.0,
                    matched_on: p.field,
                })
                .collect();
            sort_results(&mut results, index);
            results.truncate(self.cfg.limit);
            return results;
        }

        // Fuzzy pass: score every distinct token once, keep each record's
        // best-scoring token.
        let mut best: HashMap<&str, (f64, MatchField)> = HashMap::new();
        for (token, postings) in index.entries() {
            let score = similarity(normalized, token);
            if score < self.cfg.threshold {
                continue;
            }
            for posting in postings {
                let entry = best
                    .entry(posting.record_id.as_str())
                    .or_insert((score, posting.field));
                let replace = score > entry.0
                    || (score == entry.0
                        && posting.field == MatchField::Name
                        && entry.1 == MatchField::Alias);
                if replace {
                    *entry = (score, posting.field);
                }
            }
        }

        let mut results: Vec<MatchResult> = best
            .into_iter()
            .map(|(record_id, (score, matched_on))| MatchResult {
                record_id: record_id.to_string(),
                score,
                matched_on,
            })
            .collect();
        sort_results(&mut results, index);
        results.truncate(self.cfg.limit);
        results
    }
}

/// Similarity metric used for fuzzy scoring: normalized Levenshtein,
/// `1 − levenshtein(a, b) / max(|a|, |b|)`, in [0.0, 1.0]. Both inputs are
/// expected to be normalized already, so case and punctuation differences
/// never reach the edit distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Descending by score; equal scores ordered by canonical name ascending so
/// result order is total and stable across runs.
fn sort_results(results: &mut [MatchResult], index: &Index) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                let name_a = index.canonical_name(&a.record_id).unwrap_or(&a.record_id);
                let name_b = index.canonical_name(&b.record_id).unwrap_or(&b.record_id);
                name_a.cmp(name_b)
            })
    });
}
