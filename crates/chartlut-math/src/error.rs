//! Statistics error types.

use thiserror::Error;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during statistical computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A statistic was requested over zero samples.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}
