//! Gazetteer text normalization.
//!
//! Record names, aliases, and incoming queries all pass through the same
//! transform before they ever meet: a token that was indexed and a query that
//! should find it must collapse to identical strings. The pipeline is, in
//! order:
//!
//! - Unicode normalization (NFKC, configurable)
//! - Locale-free lowercasing
//! - Punctuation stripping (punctuation acts as a delimiter, configurable)
//! - Whitespace collapsing (runs of whitespace become single spaces, edges
//!   trimmed)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config in,
//! same string out, on any machine.
//!
//! Unlike a document pipeline, an input that normalizes to the empty string
//! is *not* an error here: an all-punctuation query is a legal query that
//! simply cannot match anything. Callers decide what empty means.

mod config;
mod pipeline;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::pipeline::normalize;
pub use crate::whitespace::collapse_whitespace;
