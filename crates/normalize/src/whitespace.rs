//! Whitespace-only normalization, for callers that need collapsed text
//! without the full pipeline (display labels, log lines).

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces. Deterministic; uses Unicode's whitespace definition.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
