use crate::errors::StageError;
use crate::models::Spectrum;

/// Total-ion-current normalization.
///
/// Scales every intensity by the reciprocal of the summed intensity so the
/// spectrum sums to 1, making runs with different total signal comparable.
/// A non-positive total cannot be normalized and is rejected.
pub fn calibrate_tic(spectrum: &Spectrum) -> Result<Spectrum, StageError> {
    let total: f64 = spectrum.intensities().iter().sum();
    if total <= 0.0 {
        return Err(StageError::ZeroIntensity { total });
    }
    let scaled = spectrum
        .intensities()
        .iter()
        .map(|&x| x / total)
        .collect();
    Ok(spectrum.with_intensities(scaled))
}
