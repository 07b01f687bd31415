//! Snapshot provider boundary.
//!
//! The lookup core never performs I/O of its own: something outside hands
//! [`refresh`](crate::LookupService::refresh) a ready-made
//! [`Snapshot`]. [`SnapshotProvider`] is that seam. The shipped
//! [`YamlFileProvider`] reads a YAML document of extracted game-object
//! records; anything else (an extraction library, a network fetch) plugs in
//! by implementing the trait.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use index::{Record, Snapshot, SnapshotVersion};

/// Errors raised while loading a snapshot from a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to read snapshot source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("snapshot contains no records")]
    EmptySnapshot,
}

/// Source of versioned record snapshots.
///
/// Implementations own all I/O and hand back an immutable [`Snapshot`];
/// the service never calls `load` itself — the embedding application
/// decides when to load and when to refresh.
pub trait SnapshotProvider {
    fn load(&self) -> Result<Snapshot, ProviderError>;
}

/// On-disk snapshot document shape.
///
/// ```yaml
/// version: "2.0.203.56"   # optional; content hash used when absent
/// records:
///   - id: LongSword_Crysteel
///     name: Crysteel Longsword
///     aliases: ["crysteel blade"]
///     payload:
///       tier: 5
/// ```
#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    version: Option<String>,
    records: Vec<Record>,
}

/// Loads snapshots from a YAML file of extracted records.
///
/// Records whose names start with one of the configured exclusion prefixes
/// are dropped at the boundary; extraction pipelines tend to leave
/// placeholder entries (temporary tables, scratch objects) that should
/// never be findable.
pub struct YamlFileProvider {
    path: PathBuf,
    exclude_prefixes: Vec<String>,
}

impl YamlFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exclude_prefixes: Vec::new(),
        }
    }

    /// Drop records whose name starts with any of `prefixes`.
    pub fn with_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_excluded(&self, record: &Record) -> bool {
        self.exclude_prefixes
            .iter()
            .any(|prefix| record.name.starts_with(prefix.as_str()))
    }
}

impl SnapshotProvider for YamlFileProvider {
    fn load(&self) -> Result<Snapshot, ProviderError> {
        let content = fs::read_to_string(&self.path)?;
        let document: SnapshotDocument = serde_yaml::from_str(&content)?;

        let total = document.records.len();
        let records: Vec<Record> = document
            .records
            .into_iter()
            .filter(|r| !self.is_excluded(r))
            .collect();
        if records.is_empty() {
            return Err(ProviderError::EmptySnapshot);
        }
        debug!(
            path = %self.path.display(),
            records = records.len(),
            excluded = total - records.len(),
            "snapshot loaded"
        );

        Ok(match document.version {
            Some(token) => Snapshot::with_version(records, SnapshotVersion::from_token(token)),
            None => Snapshot::new(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_records_and_content_hash_version() {
        let file = write_temp(
            r#"
records:
  - id: LongSword_Crysteel
    name: Crysteel Longsword
    aliases: ["crysteel blade"]
    payload:
      tier: 5
  - id: Waterskin
    name: Waterskin
"#,
        );
        let snapshot = YamlFileProvider::new(file.path()).load().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.record("LongSword_Crysteel").unwrap().payload["tier"],
            5
        );
        // No explicit version in the document: content hash applies, and it
        // is stable across reloads.
        let again = YamlFileProvider::new(file.path()).load().unwrap();
        assert_eq!(snapshot.version(), again.version());
    }

    #[test]
    fn explicit_version_token_wins() {
        let file = write_temp(
            "version: \"2.0.203.56\"\nrecords:\n  - id: W\n    name: Waterskin\n",
        );
        let snapshot = YamlFileProvider::new(file.path()).load().unwrap();
        assert_eq!(snapshot.version().as_str(), "2.0.203.56");
    }

    #[test]
    fn excluded_prefixes_are_dropped() {
        let file = write_temp(
            r#"
records:
  - id: t1
    name: "TEMP Scratch Table"
  - id: w
    name: Waterskin
"#,
        );
        let snapshot = YamlFileProvider::new(file.path())
            .with_exclude_prefixes(["TEMP"])
            .load()
            .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].name, "Waterskin");
    }

    #[test]
    fn all_records_excluded_is_empty_snapshot_error() {
        let file = write_temp("records:\n  - id: t\n    name: \"TEMP only\"\n");
        let result = YamlFileProvider::new(file.path())
            .with_exclude_prefixes(["TEMP"])
            .load();
        assert!(matches!(result, Err(ProviderError::EmptySnapshot)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = YamlFileProvider::new("/nonexistent/objects.yaml").load();
        assert!(matches!(result, Err(ProviderError::Io(_))));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let file = write_temp("records: \"not a list\"\n");
        let result = YamlFileProvider::new(file.path()).load();
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }
}
