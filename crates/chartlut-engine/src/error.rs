//! Engine error types.

use chartlut_math::StatsError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the calibration engine.
///
/// Structural violations abort a build immediately; no partial LUT is
/// ever returned. Per-sample data problems (a single malformed patch
/// color) are handled locally by substitution and do not surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A statistic was requested over zero samples.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Reference and camera patch sets are empty or differ in length.
    #[error("insufficient samples: reference has {reference}, camera has {camera}")]
    InsufficientSamples {
        /// Number of reference patches.
        reference: usize,
        /// Number of camera patches.
        camera: usize,
    },

    /// Lattice size below the minimum of 2 (the node step is
    /// `1 / (size - 1)`).
    #[error("invalid LUT size {0}: must be at least 2")]
    InvalidSize(usize),

    /// The requested interpolation strategy name is not registered.
    #[error("unknown interpolation strategy: {0:?}")]
    UnknownStrategy(String),

    /// The range-aware strategy was invoked without a range mapping.
    #[error("range-aware interpolation requires a range mapping")]
    MissingRangeData,

    /// A patch color is non-finite or outside the unit cube.
    ///
    /// Raised only by strict validation helpers; the build path
    /// substitutes neutral gray instead.
    #[error("invalid patch color: {0}")]
    InvalidColor(String),

    /// Structured input does not satisfy a shape invariant
    /// (parallel-array lengths, LUT entry counts).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// I/O failure while serializing a LUT.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
