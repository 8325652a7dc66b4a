#![doc = include_str!("../README.md")]

pub mod errors;
pub mod models;
pub mod peak_picking;
pub mod pipeline;
pub mod preprocessing;
pub mod utils;

// Re-export main structures
pub use crate::models::{
    Peak,
    Spectrum,
};
pub use crate::pipeline::{
    GroupFailure,
    PipelineConfig,
    ProcessingResult,
    RunSummary,
    SampleGroup,
    process_group,
    process_groups,
};

// Re-export errors
pub use crate::errors::{
    PipelineError,
    Result,
    StageError,
};
