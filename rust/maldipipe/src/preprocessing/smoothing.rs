//! Savitzky-Golay noise reduction.
//!
//! Convolves the intensity sequence with the least-squares quadratic fit
//! weights for a window of `2h + 1` points. The quadratic weights have the
//! closed form
//!
//! ```text
//! c_j = 3 * ((3m^2 + 3m - 1) - 5 j^2) / ((2m - 1)(2m + 1)(2m + 3))
//! ```
//!
//! for half-window `m` and offset `j in [-m, m]`, which sums to exactly 1,
//! so constant signals pass through unchanged. Near the boundaries the
//! window is symmetrically truncated to `m' = min(h, i, n - 1 - i)` and the
//! weights re-derived for the reduced window, which keeps the fit centered
//! without fabricating out-of-range samples.

use crate::errors::StageError;
use crate::models::Spectrum;

/// Smooth a spectrum with a quadratic Savitzky-Golay filter of half-window
/// `half_window`.
pub fn savgol_smooth(spectrum: &Spectrum, half_window: usize) -> Result<Spectrum, StageError> {
    let y = spectrum.intensities();
    let n = y.len();
    let window = 2 * half_window + 1;
    if window > n {
        return Err(StageError::WindowTooLarge { window, len: n });
    }

    // One weight vector per effective half-window; edge positions index by
    // their distance to the nearer boundary.
    let weights: Vec<Vec<f64>> = (0..=half_window).map(quadratic_weights).collect();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let m = half_window.min(i).min(n - 1 - i);
        if m == 0 {
            out.push(y[i]);
            continue;
        }
        let coeffs = &weights[m];
        let smoothed: f64 = y[i - m..=i + m]
            .iter()
            .zip(coeffs.iter())
            .map(|(&v, &c)| v * c)
            .sum();
        out.push(smoothed);
    }
    Ok(spectrum.with_intensities(out))
}

/// Closed-form quadratic least-squares smoothing weights for offsets
/// `-m ..= m`. `m = 0` degenerates to the identity weight.
fn quadratic_weights(m: usize) -> Vec<f64> {
    if m == 0 {
        return vec![1.0];
    }
    let mf = m as f64;
    let norm = (2.0 * mf - 1.0) * (2.0 * mf + 1.0) * (2.0 * mf + 3.0);
    let base = 3.0 * mf * mf + 3.0 * mf - 1.0;
    (-(m as isize)..=(m as isize))
        .map(|j| {
            let jf = j as f64;
            3.0 * (base - 5.0 * jf * jf) / norm
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(intensity: Vec<f64>) -> Spectrum {
        let mz = (0..intensity.len()).map(|i| i as f64).collect();
        Spectrum::try_new(mz, intensity).unwrap()
    }

    #[test]
    fn test_weights_match_tabulated_window_five() {
        // Classic window-5 quadratic weights: (-3, 12, 17, 12, -3) / 35.
        let w = quadratic_weights(2);
        let expected = [-3.0 / 35.0, 12.0 / 35.0, 17.0 / 35.0, 12.0 / 35.0, -3.0 / 35.0];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "got {:?}", w);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for m in 1..=25 {
            let sum: f64 = quadratic_weights(m).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "m={} sum={}", m, sum);
        }
    }

    #[test]
    fn test_constant_signal_is_preserved() {
        let s = spectrum(vec![4.2; 64]);
        let smoothed = savgol_smooth(&s, 5).unwrap();
        for &v in smoothed.intensities() {
            assert!((v - 4.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quadratic_signal_is_reproduced_exactly() {
        // A degree-2 filter reproduces any quadratic, edges included.
        let s = spectrum((0..40).map(|i| {
            let x = i as f64;
            0.5 * x * x - 3.0 * x + 7.0
        }).collect());
        let smoothed = savgol_smooth(&s, 4).unwrap();
        for (a, b) in smoothed.intensities().iter().zip(s.intensities()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reduces_alternating_noise() {
        let noisy = spectrum((0..101).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect());
        let smoothed = savgol_smooth(&noisy, 10).unwrap();
        let rough_in: f64 = noisy.intensities().iter().map(|v| v.abs()).sum();
        let rough_out: f64 = smoothed.intensities().iter().map(|v| v.abs()).sum();
        assert!(rough_out < rough_in / 2.0);
    }

    #[test]
    fn test_window_larger_than_spectrum_is_an_error() {
        let s = spectrum(vec![1.0, 2.0, 3.0]);
        let err = savgol_smooth(&s, 2).unwrap_err();
        assert_eq!(err, StageError::WindowTooLarge { window: 5, len: 3 });
    }
}
