//! Error kinds for spectrum construction, the preprocessing stages and the
//! pipeline entry point.
//!
//! Every stage failure is local to the sample group that triggered it; the
//! orchestrator in [`crate::pipeline`] converts stage errors into diagnostic
//! records instead of aborting sibling groups.

use std::fmt::Display;

/// Failure kinds raised by spectrum construction and the individual
/// preprocessing stages.
#[derive(Debug, Clone, PartialEq)]
pub enum StageError {
    /// Replicate averaging was handed an empty set of spectra.
    InsufficientData,
    /// Trimming to the inclusive window `[lo, hi]` removed every point.
    EmptyRange { lo: f64, hi: f64 },
    /// The smoothing window `2h + 1` exceeds the spectrum length.
    WindowTooLarge { window: usize, len: usize },
    /// Baseline clipping needs at least one iteration.
    InvalidIterationCount { got: usize },
    /// Total-ion-current normalization on a spectrum with no usable signal.
    ZeroIntensity { total: f64 },
    /// The parallel mass and intensity arrays disagree in length.
    MismatchedArrayLengths { mz: usize, intensity: usize },
    /// A spectrum must contain at least one point.
    EmptySpectrum,
    /// Mass values must be strictly increasing (no duplicate points).
    NonIncreasingMz { index: usize },
    /// NaN or infinite value found in an input array.
    NonFiniteValue { index: usize },
}

/// Top-level error for the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Stage(StageError),
    InvalidConfig { reason: String },
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<StageError> for PipelineError {
    fn from(x: StageError) -> Self {
        Self::Stage(x)
    }
}
