//! Configuration for the normalization pipeline.
//!
//! The same `NormalizeConfig` instance must be used for index build and for
//! query normalization; the index carries its config for exactly that
//! reason. Changing any field changes which tokens collide, so treat a
//! config change like a schema change: rebuild the index.

use serde::{Deserialize, Serialize};

/// Controls how record names, aliases, and queries are normalized.
///
/// All transforms are deterministic and locale-free. The defaults match what
/// name lookup wants: case-insensitive, punctuation-insensitive, whitespace
/// collapsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Apply Unicode NFKC normalization before other transforms, so
    /// composed and decomposed forms of the same text collide.
    #[serde(default = "default_true")]
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Treat Unicode punctuation as a delimiter and drop it. With this on,
    /// "two-handed axe" and "two handed axe" normalize identically.
    #[serde(default = "default_true")]
    pub strip_punctuation: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: true,
        }
    }
}

fn default_true() -> bool {
    true
}
