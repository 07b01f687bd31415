//! Lookup orchestration: snapshot/index lifecycle, cached resolution,
//! staleness tracking.

use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use index::{build, Index, IndexError, Record, Snapshot, SnapshotVersion};
use matcher::{MatchError, MatchResult, Matcher};
use normalize::{normalize, NormalizeConfig};

use crate::cache::QueryCache;
use crate::config::LookupConfig;
use crate::metrics::metrics_recorder;

/// Errors surfaced by [`LookupService`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// `query` was called before any snapshot was successfully indexed.
    /// Recoverable: retry after a `refresh` succeeds.
    #[error("no snapshot has been indexed yet")]
    IndexUnavailable,
    /// The offered snapshot violated an integrity invariant. The previously
    /// indexed snapshot, if any, is still being served.
    #[error("snapshot rejected: {0}")]
    InvalidSnapshot(#[from] IndexError),
    /// The service was constructed with an invalid matcher configuration.
    #[error(transparent)]
    InvalidConfig(#[from] MatchError),
}

/// One fully-published generation: a snapshot, the index built from it, and
/// the instant it went live. Readers hold the whole generation through one
/// `Arc`, so a query can never observe an index paired with a different
/// snapshot's records.
#[derive(Debug)]
struct Generation {
    snapshot: Arc<Snapshot>,
    index: Index,
    published_at: Instant,
}

/// Public-facing lookup orchestrator.
///
/// Combines the index builder, the matcher, and the query cache behind two
/// operations: [`query`](Self::query) and [`refresh`](Self::refresh).
/// Concurrent queries run in parallel against whichever generation was
/// current when they started; `refresh` publishes a new generation as a
/// single atomic swap and never corrupts the old one on failure.
#[derive(Debug)]
pub struct LookupService {
    normalize_cfg: NormalizeConfig,
    matcher: Matcher,
    current: RwLock<Option<Arc<Generation>>>,
    cache: Mutex<QueryCache>,
}

impl LookupService {
    /// Construct an empty service from configuration. No snapshot is loaded
    /// yet; `query` returns [`LookupError::IndexUnavailable`] until the
    /// first successful [`refresh`](Self::refresh).
    pub fn new(cfg: LookupConfig) -> Result<Self, LookupError> {
        let matcher = Matcher::new(cfg.matcher)?;
        Ok(Self {
            normalize_cfg: cfg.normalize,
            matcher,
            current: RwLock::new(None),
            cache: Mutex::new(QueryCache::new(cfg.cache.capacity)),
        })
    }

    /// Convenience constructor: default configuration, then an immediate
    /// refresh with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Result<Self, LookupError> {
        let service = Self::new(LookupConfig::default())?;
        service.refresh(snapshot)?;
        Ok(service)
    }

    /// Resolve `text` against the current snapshot.
    ///
    /// Consults the query cache first (keyed by normalized query and
    /// snapshot version); on a miss, runs the matcher and memoizes the
    /// outcome. Absence of matches is an empty vector, not an error.
    pub fn query(&self, text: &str) -> Result<Vec<MatchResult>, LookupError> {
        let start = Instant::now();
        let generation = self.current_generation().ok_or(LookupError::IndexUnavailable)?;

        let normalized = normalize(text, &self.normalize_cfg);
        let version = generation.index.version();

        if let Some(hit) = self.cache_get(&normalized, version) {
            debug!(query = %normalized, version = %version, results = hit.len(), "query served from cache");
            if let Some(recorder) = metrics_recorder() {
                recorder.record_query(start.elapsed(), true, hit.len());
            }
            return Ok(hit);
        }

        let results = self.matcher.resolve_normalized(&normalized, &generation.index);
        self.cache_put(normalized.clone(), version.clone(), results.clone());

        debug!(query = %normalized, version = %version, results = results.len(), "query resolved");
        if let Some(recorder) = metrics_recorder() {
            recorder.record_query(start.elapsed(), false, results.len());
        }
        Ok(results)
    }

    /// Replace the served snapshot.
    ///
    /// The new index is built before any lock is taken; on failure the
    /// error propagates and the previous generation keeps serving
    /// (all-or-nothing). On success the new generation is published as one
    /// atomic swap and the query cache is cleared.
    pub fn refresh(&self, snapshot: Snapshot) -> Result<(), LookupError> {
        let start = Instant::now();
        let record_count = snapshot.len();

        let index = match build(&snapshot, &self.normalize_cfg) {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, records = record_count, "snapshot rejected, keeping previous generation");
                let lookup_err = LookupError::from(err);
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_refresh(start.elapsed(), record_count, Err(lookup_err.clone()));
                }
                return Err(lookup_err);
            }
        };

        let version = index.version().clone();
        let generation = Arc::new(Generation {
            snapshot: Arc::new(snapshot),
            index,
            published_at: Instant::now(),
        });

        {
            let mut current = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *current = Some(generation);
        }
        self.cache_clear();

        info!(version = %version, records = record_count, "snapshot refreshed");
        if let Some(recorder) = metrics_recorder() {
            recorder.record_refresh(start.elapsed(), record_count, Ok(()));
        }
        Ok(())
    }

    /// Whether the served snapshot is older than `max_age`, or absent
    /// entirely. Measured on the monotonic clock.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        match self.current_generation() {
            Some(generation) => generation.published_at.elapsed() > max_age,
            None => true,
        }
    }

    /// The currently served snapshot, for resolving record ids back to
    /// display content. `None` before the first successful refresh.
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current_generation().map(|g| Arc::clone(&g.snapshot))
    }

    /// Version of the currently served snapshot.
    pub fn current_version(&self) -> Option<SnapshotVersion> {
        self.current_generation().map(|g| g.index.version().clone())
    }

    /// Resolve a record id against the current snapshot.
    pub fn record(&self, id: &str) -> Option<Record> {
        self.current_generation()
            .and_then(|g| g.snapshot.record(id).cloned())
    }

    fn current_generation(&self) -> Option<Arc<Generation>> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    fn cache_get(&self, query: &str, version: &SnapshotVersion) -> Option<Vec<MatchResult>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(query, version)
    }

    fn cache_put(&self, query: String, version: SnapshotVersion, results: Vec<MatchResult>) {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .put(query, version, results);
    }

    fn cache_clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, name: &str, aliases: &[&str]) -> Record {
        Record {
            id: id.into(),
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            payload: json!({}),
        }
    }

    fn crysteel_snapshot() -> Snapshot {
        Snapshot::new(vec![record(
            "1",
            "Crysteel Longsword",
            &["crysteel blade"],
        )])
    }

    #[test]
    fn query_before_first_refresh_is_unavailable() {
        let service = LookupService::new(LookupConfig::default()).unwrap();
        assert_eq!(
            service.query("anything").unwrap_err(),
            LookupError::IndexUnavailable
        );
        assert!(service.is_stale(Duration::from_secs(0)));
    }

    #[test]
    fn exact_and_fuzzy_queries_resolve() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();

        let exact = service.query("Crysteel Longsword").unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].score, 1.0);

        let fuzzy = service.query("crysteel sword").unwrap();
        assert_eq!(fuzzy.len(), 1);
        assert!(fuzzy[0].score >= 0.6);

        assert!(service.query("zzz").unwrap().is_empty());
    }

    #[test]
    fn repeated_query_served_from_cache_with_identical_results() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();
        let first = service.query("crysteel sword").unwrap();
        let second = service.query("crysteel sword").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_refresh_keeps_previous_generation() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();
        let version_before = service.current_version().unwrap();

        let bad = Snapshot::new(vec![
            record("dup", "Glow Wight", &[]),
            record("dup", "Salt Kraken", &[]),
        ]);
        let err = service.refresh(bad).unwrap_err();
        assert!(matches!(err, LookupError::InvalidSnapshot(_)));

        assert_eq!(service.current_version().unwrap(), version_before);
        let hits = service.query("crysteel longsword").unwrap();
        assert_eq!(hits[0].record_id, "1");
    }

    #[test]
    fn refresh_swaps_visible_records_completely() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();
        assert_eq!(service.query("crysteel longsword").unwrap().len(), 1);

        let replacement = Snapshot::new(vec![record("2", "Glow Wight", &[])]);
        service.refresh(replacement).unwrap();

        assert!(service.query("crysteel longsword").unwrap().is_empty());
        assert_eq!(service.query("glow wight").unwrap().len(), 1);
    }

    #[test]
    fn record_resolution_follows_current_snapshot() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();
        assert_eq!(service.record("1").unwrap().name, "Crysteel Longsword");
        assert!(service.record("2").is_none());

        service
            .refresh(Snapshot::new(vec![record("2", "Glow Wight", &[])]))
            .unwrap();
        assert!(service.record("1").is_none());
        assert_eq!(service.record("2").unwrap().name, "Glow Wight");
    }

    #[test]
    fn freshness_tracked_after_refresh() {
        let service = LookupService::with_snapshot(crysteel_snapshot()).unwrap();
        assert!(!service.is_stale(Duration::from_secs(900)));
    }
}
