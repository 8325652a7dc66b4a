use crate::errors::StageError;
use crate::models::Spectrum;

/// Collapse technical replicates of one sample into a single spectrum.
///
/// All replicates are brought onto the mass grid of the first replicate
/// (a no-op when the grids already match; linear interpolation otherwise)
/// and averaged point-wise. A single replicate is returned unchanged.
pub fn average_spectra(spectra: &[Spectrum]) -> Result<Spectrum, StageError> {
    let first = spectra.first().ok_or(StageError::InsufficientData)?;
    if spectra.len() == 1 {
        return Ok(first.clone());
    }

    let grid = first.mzs();
    let mut acc = first.intensities().to_vec();
    for replicate in &spectra[1..] {
        if replicate.mzs() == grid {
            for (a, &v) in acc.iter_mut().zip(replicate.intensities()) {
                *a += v;
            }
        } else {
            for (a, v) in acc.iter_mut().zip(replicate.resample_to(grid)) {
                *a += v;
            }
        }
    }

    let count = spectra.len() as f64;
    for a in acc.iter_mut() {
        *a /= count;
    }
    Ok(first.with_intensities(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(mz: &[f64], intensity: &[f64]) -> Spectrum {
        Spectrum::try_new(mz.to_vec(), intensity.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_set_is_an_error() {
        assert_eq!(
            average_spectra(&[]).unwrap_err(),
            StageError::InsufficientData
        );
    }

    #[test]
    fn test_single_replicate_is_identity() {
        let s = spectrum(&[1.0, 2.0, 3.0], &[5.0, 7.0, 9.0]);
        let averaged = average_spectra(std::slice::from_ref(&s)).unwrap();
        assert_eq!(averaged, s);
    }

    #[test]
    fn test_mean_on_matching_grids() {
        let a = spectrum(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        let b = spectrum(&[1.0, 2.0, 3.0], &[3.0, 4.0, 5.0]);
        let averaged = average_spectra(&[a, b]).unwrap();
        assert_eq!(averaged.intensities(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mismatched_grid_is_resampled_to_first() {
        let a = spectrum(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]);
        // Offset grid; interpolates to [15.0, 25.0, 30.0] on a's grid
        // (constant extrapolation past the last point).
        let b = spectrum(&[0.5, 1.5, 2.5], &[10.0, 20.0, 30.0]);
        let averaged = average_spectra(&[a.clone(), b]).unwrap();
        assert_eq!(averaged.mzs(), a.mzs());
        assert_eq!(averaged.intensities(), &[7.5, 12.5, 15.0]);
    }
}
