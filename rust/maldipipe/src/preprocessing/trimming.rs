use crate::errors::StageError;
use crate::models::Spectrum;

/// Restrict a spectrum to the inclusive mass window `[lo, hi]`.
pub fn trim(spectrum: &Spectrum, lo: f64, hi: f64) -> Result<Spectrum, StageError> {
    let mzs = spectrum.mzs();
    let start = mzs.partition_point(|&m| m < lo);
    let end = mzs.partition_point(|&m| m <= hi);
    if start >= end {
        return Err(StageError::EmptyRange { lo, hi });
    }
    Ok(Spectrum::from_validated_parts(
        mzs[start..end].to_vec(),
        spectrum.intensities()[start..end].to_vec(),
    ))
}
