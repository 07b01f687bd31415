use index::MatchField;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs for query resolution.
///
/// Serde-friendly with defaults, so it can be embedded in a larger
/// configuration document and partially specified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Minimum similarity score a fuzzy candidate must reach to be
    /// returned. Exact matches always score 1.0 and are unaffected.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
    /// Maximum number of results returned per query.
    #[serde(default = "MatchConfig::default_limit")]
    pub limit: usize,
}

impl MatchConfig {
    pub(crate) fn default_threshold() -> f64 {
        0.6
    }

    pub(crate) fn default_limit() -> usize {
        5
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "threshold must be within [0.0, 1.0], got {}",
                self.threshold
            )));
        }
        if self.limit == 0 {
            return Err(MatchError::InvalidConfig(
                "limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            limit: Self::default_limit(),
        }
    }
}

/// A single ranked hit returned by the matcher.
///
/// Carries only the record id; resolving the id back to display content is
/// the caller's job, against whatever snapshot is current.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    /// Id of the matched record.
    pub record_id: String,
    /// Similarity in [0.0, 1.0]; 1.0 means the normalized query equaled an
    /// indexed token exactly.
    pub score: f64,
    /// Whether the winning token was the record's name or an alias.
    pub matched_on: MatchField,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Threshold or limit outside their legal ranges.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.limit, 5);
        assert!((cfg.threshold - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        for threshold in [-0.1, 1.1, f64::NAN] {
            let cfg = MatchConfig {
                threshold,
                ..Default::default()
            };
            let err = cfg.validate().expect_err("config should be invalid");
            assert!(matches!(err, MatchError::InvalidConfig(msg) if msg.contains("threshold")));
        }
    }

    #[test]
    fn zero_limit_rejected() {
        let cfg = MatchConfig {
            limit: 0,
            ..Default::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        assert!(matches!(err, MatchError::InvalidConfig(msg) if msg.contains("limit")));
    }

    #[test]
    fn partial_document_uses_defaults() {
        let cfg: MatchConfig =
            serde_json::from_value(serde_json::json!({ "threshold": 0.8 })).unwrap();
        assert!((cfg.threshold - 0.8).abs() < f64::EPSILON);
        assert_eq!(cfg.limit, MatchConfig::default_limit());
    }
}
