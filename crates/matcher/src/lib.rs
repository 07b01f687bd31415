//! # Gazetteer matcher
//!
//! Turns free-text queries into ranked record hits against a built
//! [`index::Index`]. Resolution is two-pass:
//!
//! 1. **Exact**: if the normalized query equals an indexed token, every
//!    record behind that token is returned at score 1.0 and no fuzzy
//!    scoring runs.
//! 2. **Fuzzy**: otherwise each distinct token is scored with normalized
//!    Levenshtein similarity (see [`similarity`]); candidates below the
//!    threshold are dropped, each record keeps its best token, and the
//!    survivors are sorted descending by score with a canonical-name
//!    tie-break, then truncated to the result limit.
//!
//! No match is never an error: the empty result list is the ordinary answer
//! for queries that resemble nothing.
//!
//! ```
//! use index::{build, Record, Snapshot};
//! use matcher::{MatchConfig, Matcher};
//! use normalize::NormalizeConfig;
//! use serde_json::Value;
//!
//! let snapshot = Snapshot::new(vec![Record {
//!     id: "LongSword_Crysteel".into(),
//!     name: "Crysteel Longsword".into(),
//!     aliases: vec!["crysteel blade".into()],
//!     payload: Value::Null,
//! }]);
//! let index = build(&snapshot, &NormalizeConfig::default()).unwrap();
//!
//! let matcher = Matcher::new(MatchConfig::default()).unwrap();
//! let hits = matcher.resolve("crysteel sword", &index);
//! assert_eq!(hits[0].record_id, "LongSword_Crysteel");
//! ```

mod engine;
mod types;

pub use crate::engine::{similarity, Matcher};
pub use crate::types::{MatchConfig, MatchError, MatchResult};

// Re-exported so callers matching on results don't need a direct index dep.
pub use index::MatchField;
