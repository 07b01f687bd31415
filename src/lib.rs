//! # Gazetteer
//!
//! A fuzzy-match lookup engine for game-object records. A data provider
//! supplies a versioned [`Snapshot`] of records (id, canonical name,
//! aliases, opaque payload); gazetteer builds a normalized-token index over
//! it and answers free-text queries with ranked, confidence-scored hits.
//!
//! The pieces, smallest first:
//!
//! - `normalize` — deterministic text normalization shared by indexing and
//!   querying.
//! - `index` — the record data model and the per-snapshot token index,
//!   rebuilt wholesale on every refresh.
//! - `matcher` — exact-then-fuzzy resolution with thresholds,
//!   canonical-name tie-breaks, and result limits.
//! - [`QueryCache`] — bounded LRU memoization keyed by normalized query
//!   and snapshot version.
//! - [`LookupService`] — the public orchestrator: cached queries, atomic
//!   snapshot refresh, staleness tracking.
//!
//! ## Example
//!
//! ```
//! use gazetteer::{LookupService, Record, Snapshot};
//! use serde_json::json;
//!
//! let snapshot = Snapshot::new(vec![Record {
//!     id: "LongSword_Crysteel".into(),
//!     name: "Crysteel Longsword".into(),
//!     aliases: vec!["crysteel blade".into()],
//!     payload: json!({ "tier": 5 }),
//! }]);
//!
//! let service = LookupService::with_snapshot(snapshot).unwrap();
//! let hits = service.query("crysteel sword").unwrap();
//! assert_eq!(hits[0].record_id, "LongSword_Crysteel");
//!
//! // The caller owns display: resolve the id against the live snapshot.
//! let record = service.record(&hits[0].record_id).unwrap();
//! assert_eq!(record.payload["tier"], 5);
//! ```
//!
//! ## Concurrency
//!
//! `query` calls run in parallel and never block each other; each operates
//! against whichever snapshot/index generation was current when it started.
//! `refresh` builds the replacement index off-lock and publishes it as a
//! single atomic swap — a failed refresh leaves the serving generation
//! untouched.

pub mod cache;
pub mod config;
pub mod metrics;
pub mod provider;
pub mod service;

pub use crate::cache::{CacheConfig, QueryCache};
pub use crate::config::{ConfigError, LookupConfig};
pub use crate::metrics::{set_lookup_metrics, LookupMetrics};
pub use crate::provider::{ProviderError, SnapshotProvider, YamlFileProvider};
pub use crate::service::{LookupError, LookupService};

pub use index::{build, Index, IndexError, Record, Snapshot, SnapshotVersion};
pub use matcher::{MatchConfig, MatchError, MatchField, MatchResult, Matcher};
pub use normalize::{normalize, NormalizeConfig};
