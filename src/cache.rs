//! Bounded memoization of query results.
//!
//! Entries are keyed by the *normalized* query string and carry the
//! snapshot version they were computed against. A lookup with a different
//! current version is a miss, and the stale entry is evicted on that touch;
//! [`QueryCache::clear`] additionally wipes everything on snapshot
//! replacement. Either mechanism alone keeps staleness unobservable — both
//! together also keep dead entries from squatting on capacity.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use index::SnapshotVersion;
use matcher::MatchResult;

/// Capacity configuration for the query cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of memoized queries held at once. Least-recently-used
    /// entries are evicted beyond this.
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    pub(crate) fn default_capacity() -> usize {
        256
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    results: Vec<MatchResult>,
    version: SnapshotVersion,
}

/// LRU cache of `normalized query → ranked results`, version-checked.
///
/// Not internally synchronized; the service wraps it in a `Mutex`.
#[derive(Debug)]
pub struct QueryCache {
    entries: LruCache<String, CacheEntry>,
}

impl QueryCache {
    /// A zero capacity is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Fetch memoized results for `query` if present *and* computed against
    /// `version`. A version mismatch pops the entry and reports a miss.
    pub fn get(&mut self, query: &str, version: &SnapshotVersion) -> Option<Vec<MatchResult>> {
        match self.entries.get(query) {
            Some(entry) if entry.version == *version => Some(entry.results.clone()),
            Some(_) => {
                self.entries.pop(query);
                None
            }
            None => None,
        }
    }

    /// Memoize `results` for `query` as computed against `version`.
    pub fn put(&mut self, query: String, version: SnapshotVersion, results: Vec<MatchResult>) {
        self.entries.put(query, CacheEntry { results, version });
    }

    /// Drop every entry. Called on snapshot replacement.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}
