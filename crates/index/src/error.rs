use thiserror::Error;

/// Errors raised while building an index from a snapshot.
///
/// A build failure is fatal to that snapshot only: the caller keeps serving
/// whatever index it already had.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IndexError {
    /// Snapshot integrity violation: two records share an id.
    #[error("snapshot contains duplicate record id: {0}")]
    DuplicateRecordId(String),
}
