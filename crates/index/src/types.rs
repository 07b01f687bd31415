//! Core data model: records, snapshots, and snapshot version tokens.
//!
//! A [`Snapshot`] is the unit of data exchange with the external data
//! provider: an ordered sequence of [`Record`]s plus an opaque
//! [`SnapshotVersion`]. Records are immutable for the snapshot's lifetime
//! and are replaced wholesale on re-index, never patched.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::fmt;

/// A single indexed entity: stable id, canonical display name, alias
/// strings, and an opaque attribute payload.
///
/// The payload is whatever the data extractor emitted for this object —
/// a loosely-typed mapping (strings, numbers, booleans, nested maps).
/// Nothing in the lookup core interprets it; callers extract and validate
/// the fields they need at the display boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Stable identifier, unique within a snapshot.
    pub id: String,
    /// Canonical display name. Also the lexical tie-break key for ranking.
    pub name: String,
    /// Alternative names this record should be findable under.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Opaque attribute mapping from the data provider.
    #[serde(default)]
    pub payload: JsonValue,
}

/// Opaque version token identifying one loaded snapshot.
///
/// Two snapshots with equal tokens are treated as the same data by the
/// query cache, so tokens must change whenever the lookup-relevant content
/// changes. [`SnapshotVersion::from_records`] derives one as a content
/// hash; providers with a better notion of identity can supply their own
/// via [`SnapshotVersion::from_token`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotVersion(String);

impl SnapshotVersion {
    /// Wrap a caller-supplied token (a release tag, an etag, a timestamp).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// SHA-256 content hash over every record's id, name, and aliases, in
    /// snapshot order. Payloads are deliberately excluded: matching only
    /// observes names and aliases, so cached results stay valid across
    /// payload-only edits, and callers always read payloads from the
    /// current snapshot anyway.
    pub fn from_records(records: &[Record]) -> Self {
        let mut hasher = Sha256::new();
        for record in records {
            hasher.update(record.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(record.name.as_bytes());
            hasher.update([0u8]);
            for alias in &record.aliases {
                hasher.update(alias.as_bytes());
                hasher.update([0u8]);
            }
            hasher.update([0xFFu8]);
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable, versioned set of records loaded at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    records: Vec<Record>,
    version: SnapshotVersion,
}

impl Snapshot {
    /// Build a snapshot with a content-hash version derived from the
    /// records themselves.
    pub fn new(records: Vec<Record>) -> Self {
        let version = SnapshotVersion::from_records(&records);
        Self { records, version }
    }

    /// Build a snapshot with an explicit version token.
    pub fn with_version(records: Vec<Record>, version: SnapshotVersion) -> Self {
        Self { records, version }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn version(&self) -> &SnapshotVersion {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Linear scan by record id. Display-path convenience; the hot path
    /// goes through the index, not through this.
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }
}
