//! # Gazetteer index
//!
//! Data model and index builder for the lookup engine. A data provider
//! hands over a [`Snapshot`] — an ordered, versioned, immutable sequence of
//! [`Record`]s — and [`build`] turns it into an [`Index`]: a map from
//! normalized tokens (names and aliases) to the records that carry them.
//!
//! ## Key properties
//!
//! - **Replace, not patch**: an index is derived from exactly one snapshot
//!   and is never mutated afterwards. A new snapshot means a new build.
//! - **Collisions are data**: distinct records may share a normalized
//!   token; the index keeps every posting and lets the matcher rank them.
//! - **Integrity at the door**: duplicate record ids fail the build with
//!   [`IndexError::DuplicateRecordId`] before anything is produced.
//! - **Self-describing**: the index carries the [`NormalizeConfig`] it was
//!   built with and its snapshot's [`SnapshotVersion`], so query
//!   normalization and cache keying cannot drift from build time.
//!
//! ```
//! use index::{build, Record, Snapshot};
//! use normalize::NormalizeConfig;
//! use serde_json::json;
//!
//! let snapshot = Snapshot::new(vec![Record {
//!     id: "LongSword_Crysteel".into(),
//!     name: "Crysteel Longsword".into(),
//!     aliases: vec!["crysteel blade".into()],
//!     payload: json!({ "tier": 5 }),
//! }]);
//!
//! let index = build(&snapshot, &NormalizeConfig::default()).unwrap();
//! assert!(index.postings("crysteel longsword").is_some());
//! ```

mod builder;
mod error;
mod types;

pub use crate::builder::{build, Index, MatchField, Posting};
pub use crate::error::IndexError;
pub use crate::types::{Record, Snapshot, SnapshotVersion};
