//! Index construction.
//!
//! `build` consumes a snapshot and produces the searchable structure:
//! every record name and alias is normalized into a token, and each token
//! maps to the postings (record id + which field produced it) that share
//! it. Collisions are legal — two records may share an alias — and the
//! index is rebuilt wholesale per snapshot, never mutated incrementally.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use normalize::{normalize, NormalizeConfig};

use crate::error::IndexError;
use crate::types::{Snapshot, SnapshotVersion};

/// Which record field a token (and later, a match) came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// The record's canonical name.
    Name,
    /// One of the record's aliases.
    Alias,
}

/// One record reachable through a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Id of the record this token belongs to.
    pub record_id: String,
    /// Whether the token came from the name or an alias.
    pub field: MatchField,
}

/// Searchable structure derived from one snapshot.
///
/// Immutable once built. Carries the [`NormalizeConfig`] it was built with
/// so query-time normalization is guaranteed to match token-time
/// normalization, and the snapshot version so caches can key on it.
#[derive(Debug, Clone)]
pub struct Index {
    entries: HashMap<String, Vec<Posting>>,
    names: HashMap<String, String>,
    version: SnapshotVersion,
    normalize_cfg: NormalizeConfig,
}

impl Index {
    /// Postings for an exactly-matching normalized token.
    pub fn postings(&self, token: &str) -> Option<&[Posting]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    /// Iterate every distinct normalized token with its postings.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.entries
            .iter()
            .map(|(token, postings)| (token.as_str(), postings.as_slice()))
    }

    /// Canonical name of an indexed record, for ranking tie-breaks and
    /// display.
    pub fn canonical_name(&self, record_id: &str) -> Option<&str> {
        self.names.get(record_id).map(String::as_str)
    }

    /// Version of the snapshot this index was built from.
    pub fn version(&self) -> &SnapshotVersion {
        &self.version
    }

    /// The normalization applied to every token; queries must use the same.
    pub fn normalize_config(&self) -> &NormalizeConfig {
        &self.normalize_cfg
    }

    /// Number of distinct normalized tokens.
    pub fn token_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of records indexed.
    pub fn record_count(&self) -> usize {
        self.names.len()
    }
}

/// Build a fresh index from `snapshot`.
///
/// Fails with [`IndexError::DuplicateRecordId`] if two records share an id;
/// in that case nothing is produced and any previously built index is
/// untouched (this function never mutates one). Names or aliases that
/// normalize to the empty string simply contribute no token.
pub fn build(snapshot: &Snapshot, cfg: &NormalizeConfig) -> Result<Index, IndexError> {
    let mut seen_ids: HashSet<&str> = HashSet::with_capacity(snapshot.len());
    for record in snapshot.records() {
        if !seen_ids.insert(record.id.as_str()) {
            return Err(IndexError::DuplicateRecordId(record.id.clone()));
        }
    }

    let mut entries: HashMap<String, Vec<Posting>> = HashMap::new();
    let mut names: HashMap<String, String> = HashMap::with_capacity(snapshot.len());

    for record in snapshot.records() {
        names.insert(record.id.clone(), record.name.clone());

        let name_token = normalize(&record.name, cfg);
        if !name_token.is_empty() {
            insert_posting(&mut entries, name_token, record.id.as_str(), MatchField::Name);
        }

        for alias in &record.aliases {
            let alias_token = normalize(alias, cfg);
            if !alias_token.is_empty() {
                insert_posting(&mut entries, alias_token, record.id.as_str(), MatchField::Alias);
            }
        }
    }

    Ok(Index {
        entries,
        names,
        version: snapshot.version().clone(),
        normalize_cfg: cfg.clone(),
    })
}

/// At most one posting per record per token; when a record's name and one
/// of its aliases collapse to the same token, the name wins.
fn insert_posting(
    entries: &mut HashMap<String, Vec<Posting>>,
    token: String,
    record_id: &str,
    field: MatchField,
) {
    let postings = entries.entry(token).or_default();
    if postings.iter().any(|p| p.record_id == record_id) {
        return;
    }
    postings.push(Posting {
        record_id: record_id.to_string(),
        field,
    });
}
