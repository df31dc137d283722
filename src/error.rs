//! Error types for engine construction
//!
//! Scoring calls never return errors - bad input degrades to documented
//! defaults so one malformed record cannot abort a batch. The only fatal
//! errors are configuration mistakes, raised once at construction time.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid score weight '{name}': {value} (must be a finite, non-negative number)")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("score weights sum to {0}, must be positive")]
    ZeroWeights(f64),

    #[error("keyword list '{0}' contains an empty entry")]
    EmptyKeyword(&'static str),

    #[error("rehab percentage '{name}' out of range: {value} (expected 0.0..=1.0)")]
    InvalidRehabPct { name: &'static str, value: f64 },

    #[error("financing assumption '{name}' out of range: {value}")]
    InvalidFinancing { name: &'static str, value: f64 },

    #[error("failed to parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),
}
