//! Error types for ring-shape building

use crate::geometry::Sampling;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RingerError {
    #[error("Configuration list mismatch: {name} has {got} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Negative ring count for {sampling:?}: {count}")]
    NegativeRingCount { sampling: Sampling, count: i64 },

    #[error("Non-positive ring width for {sampling:?}: {width}")]
    NonPositiveWidth { sampling: Sampling, width: f64 },

    #[error("No cluster collection under key '{0}'")]
    MissingInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
