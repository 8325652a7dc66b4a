//! Pipeline orchestration.
//!
//! Runs the preprocessing chain and the peak detector once per sample
//! group, in parallel across groups. Groups share no mutable state, so the
//! only synchronization is the join at the end of the parallel section;
//! the keyed result map is assembled sequentially on the calling thread.
//! A stage failure is recorded as a diagnostic and never aborts sibling
//! groups. Failures are final; none of the stage errors are transient, so
//! there are no retries.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::errors::{
    PipelineError,
    Result,
    StageError,
};
use crate::models::{
    Peak,
    Spectrum,
};
use crate::peak_picking::detect_peaks;
use crate::preprocessing::{
    average_spectra,
    calibrate_tic,
    remove_baseline,
    savgol_smooth,
    sqrt_transform,
    trim,
};

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Signal-to-noise acceptance threshold for peak detection.
    pub snr_threshold: f64,
    /// Savitzky-Golay half-window (window size `2h + 1`).
    pub smoothing_half_window: usize,
    /// SNIP clipping iterations; controls baseline window reach.
    pub baseline_iterations: usize,
    /// Inclusive mass window `(lo, hi)` the spectra are trimmed to.
    pub trim_range: (f64, f64),
    /// Half-window for the peak detector's local noise estimate.
    pub noise_half_window: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            snr_threshold: 2.0,
            smoothing_half_window: 10,
            baseline_iterations: 100,
            trim_range: (5000.0, 10000.0),
            noise_half_window: 20,
        }
    }
}

impl PipelineConfig {
    /// Reject out-of-domain parameters up front so a run fails with a
    /// configuration diagnostic instead of a misleading stage error.
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.trim_range;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(PipelineError::InvalidConfig {
                reason: format!("trim_range ({}, {}) must satisfy lo < hi", lo, hi),
            });
        }
        if self.smoothing_half_window < 1 {
            return Err(PipelineError::InvalidConfig {
                reason: "smoothing_half_window must be at least 1".to_string(),
            });
        }
        if self.baseline_iterations < 1 {
            return Err(PipelineError::InvalidConfig {
                reason: "baseline_iterations must be at least 1".to_string(),
            });
        }
        if !(self.snr_threshold > 0.0) {
            return Err(PipelineError::InvalidConfig {
                reason: format!("snr_threshold {} must be positive", self.snr_threshold),
            });
        }
        if self.noise_half_window < 1 {
            return Err(PipelineError::InvalidConfig {
                reason: "noise_half_window must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Raw replicate spectra for one sample group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleGroup {
    pub id: String,
    pub replicates: Vec<Spectrum>,
}

/// Output of a successful run for one sample group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub processed: Spectrum,
    pub peaks: Vec<Peak>,
}

/// Diagnostic record for a group whose processing failed.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    pub group: String,
    pub error: PipelineError,
}

/// The outcome of a whole run: results keyed by group identifier plus
/// one diagnostic per failed group. A failed group is simply absent from
/// `results`.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub results: HashMap<String, ProcessingResult>,
    pub failures: Vec<GroupFailure>,
}

/// Run the full chain for a single group of replicate spectra.
pub fn process_group(
    replicates: &[Spectrum],
    config: &PipelineConfig,
) -> std::result::Result<ProcessingResult, StageError> {
    let (lo, hi) = config.trim_range;
    let averaged = average_spectra(replicates)?;
    let trimmed = trim(&averaged, lo, hi)?;
    let transformed = sqrt_transform(&trimmed);
    let smoothed = savgol_smooth(&transformed, config.smoothing_half_window)?;
    let corrected = remove_baseline(&smoothed, config.baseline_iterations)?;
    let calibrated = calibrate_tic(&corrected)?;
    let peaks = detect_peaks(&calibrated, config.noise_half_window, config.snr_threshold);
    debug!(
        points = calibrated.len(),
        peaks = peaks.len(),
        "processed sample group"
    );
    Ok(ProcessingResult {
        processed: calibrated,
        peaks,
    })
}

/// Process every sample group and collect results keyed by group
/// identifier. Groups run on rayon worker threads; a failing group is
/// logged, recorded in [`RunSummary::failures`] and skipped.
pub fn process_groups(groups: &[SampleGroup], config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;
    info!(groups = groups.len(), "starting pipeline run");

    let outcomes: Vec<(String, std::result::Result<ProcessingResult, StageError>)> = groups
        .par_iter()
        .map(|group| (group.id.clone(), process_group(&group.replicates, config)))
        .collect();

    let mut summary = RunSummary::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                if summary.results.insert(id.clone(), result).is_some() {
                    warn!(group = %id, "duplicate group identifier, keeping last result");
                }
            }
            Err(error) => {
                warn!(group = %id, error = ?error, "sample group failed, excluding from results");
                summary.failures.push(GroupFailure {
                    group: id,
                    error: error.into(),
                });
            }
        }
    }
    info!(
        ok = summary.results.len(),
        failed = summary.failures.len(),
        "pipeline run finished"
    );
    Ok(summary)
}
