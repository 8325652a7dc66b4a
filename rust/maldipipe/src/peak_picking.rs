//! Peak detection on a fully preprocessed spectrum.
//!
//! A position qualifies as a peak when it is a strict local maximum and its
//! intensity clears a signal-to-noise gate. The noise estimate is the median
//! absolute deviation of the intensities in a window around the candidate,
//! scaled by 1.4826 so it approximates a standard deviation under
//! near-Gaussian noise.

use crate::models::{
    Peak,
    Spectrum,
};
use crate::utils::robust::mad;

/// Consistency constant mapping MAD to a Gaussian standard deviation.
const MAD_SCALE: f64 = 1.4826;

/// Floor for the noise estimate. A window of identical values has MAD 0;
/// the floor keeps the signal-to-noise ratio finite there instead of
/// accepting every local maximum unconditionally.
const NOISE_FLOOR: f64 = f64::EPSILON;

/// Extract peaks from `spectrum` using a noise window of `half_window`
/// points to each side and a signal-to-noise acceptance threshold of
/// `snr_threshold`.
///
/// Returns peaks ascending by mass. A quiet spectrum yields an empty list,
/// not an error.
pub fn detect_peaks(spectrum: &Spectrum, half_window: usize, snr_threshold: f64) -> Vec<Peak> {
    let y = spectrum.intensities();
    let mzs = spectrum.mzs();
    let n = y.len();
    if n < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    let mut scratch = Vec::with_capacity(2 * half_window + 1);
    for i in 1..n - 1 {
        if !(y[i] > y[i - 1] && y[i] > y[i + 1]) {
            continue;
        }
        let start = i.saturating_sub(half_window);
        let end = (i + half_window + 1).min(n);
        let noise = (MAD_SCALE * mad(&y[start..end], &mut scratch)).max(NOISE_FLOOR);
        let snr = y[i] / noise;
        if snr >= snr_threshold {
            peaks.push(Peak {
                mz: mzs[i],
                intensity: y[i],
                snr,
            });
        }
    }
    peaks
}
