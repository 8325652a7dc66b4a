//! SNIP baseline estimation and removal.
//!
//! Statistics-sensitive Non-linear Iterative Peak-clipping: the intensity
//! sequence is mapped through the log-log-square-root (LLS) transform, which
//! compresses peak amplitude relative to the slowly-varying background, then
//! repeatedly clipped toward the average of symmetric neighbors at growing
//! distance. The iteration count controls the reach of the clipping window:
//! larger values remove broader baseline features but start eroding wide
//! true peaks as well — a tunable tradeoff, not a defect.
//!
//! The estimated baseline is subtracted in original intensity units. The
//! residual may dip slightly below zero near the edges; it is deliberately
//! left unclipped.

use crate::errors::StageError;
use crate::models::Spectrum;

/// Estimate the baseline of `intensity` with `iterations` SNIP passes.
pub fn snip_baseline(intensity: &[f64], iterations: usize) -> Result<Vec<f64>, StageError> {
    if iterations < 1 {
        return Err(StageError::InvalidIterationCount { got: iterations });
    }
    let n = intensity.len();

    // LLS transform: v = ln(ln(sqrt(y + 1) + 1) + 1).
    let mut v: Vec<f64> = intensity
        .iter()
        .map(|&y| (((y + 1.0).sqrt() + 1.0).ln() + 1.0).ln())
        .collect();
    let mut scratch = v.clone();

    for p in 1..=iterations {
        if 2 * p >= n {
            // Neighbors at distance p are out of range everywhere.
            break;
        }
        scratch.copy_from_slice(&v);
        for i in p..n - p {
            let clipped = (v[i - p] + v[i + p]) / 2.0;
            if clipped < v[i] {
                scratch[i] = clipped;
            }
        }
        std::mem::swap(&mut v, &mut scratch);
    }

    // Invert the LLS transform back to intensity units.
    let baseline = v
        .iter()
        .map(|&t| {
            let u = ((t.exp() - 1.0).exp()) - 1.0;
            u * u - 1.0
        })
        .collect();
    Ok(baseline)
}

/// Subtract the SNIP baseline estimate from a spectrum.
pub fn remove_baseline(spectrum: &Spectrum, iterations: usize) -> Result<Spectrum, StageError> {
    let baseline = snip_baseline(spectrum.intensities(), iterations)?;
    let corrected = spectrum
        .intensities()
        .iter()
        .zip(baseline.iter())
        .map(|(&y, &b)| y - b)
        .collect();
    Ok(spectrum.with_intensities(corrected))
}
