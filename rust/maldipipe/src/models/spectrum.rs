use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::StageError;

/// A mass spectrum as paired mass/intensity arrays.
///
/// Invariants enforced at construction:
/// - both arrays have the same length and at least one point,
/// - mass values are strictly increasing (no duplicate points),
/// - every value is finite.
///
/// A `Spectrum` is immutable once produced; every preprocessing stage
/// consumes a reference and returns a fresh value, so intermediate stages
/// stay inspectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpectrum", into = "RawSpectrum")]
pub struct Spectrum {
    mz: Vec<f64>,
    intensity: Vec<f64>,
}

/// Wire form of a [`Spectrum`]; deserialization funnels through
/// [`Spectrum::try_new`] so malformed payloads are rejected at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSpectrum {
    mz: Vec<f64>,
    intensity: Vec<f64>,
}

impl TryFrom<RawSpectrum> for Spectrum {
    type Error = String;

    fn try_from(raw: RawSpectrum) -> Result<Self, Self::Error> {
        Spectrum::try_new(raw.mz, raw.intensity).map_err(|e| format!("{:?}", e))
    }
}

impl From<Spectrum> for RawSpectrum {
    fn from(s: Spectrum) -> Self {
        RawSpectrum {
            mz: s.mz,
            intensity: s.intensity,
        }
    }
}

impl Spectrum {
    pub fn try_new(mz: Vec<f64>, intensity: Vec<f64>) -> Result<Self, StageError> {
        if mz.len() != intensity.len() {
            return Err(StageError::MismatchedArrayLengths {
                mz: mz.len(),
                intensity: intensity.len(),
            });
        }
        if mz.is_empty() {
            return Err(StageError::EmptySpectrum);
        }
        for (i, &m) in mz.iter().enumerate() {
            if !m.is_finite() || !intensity[i].is_finite() {
                return Err(StageError::NonFiniteValue { index: i });
            }
            if i > 0 && m <= mz[i - 1] {
                return Err(StageError::NonIncreasingMz { index: i });
            }
        }
        Ok(Self { mz, intensity })
    }

    /// Build from parts already known to uphold the invariants (stage
    /// outputs derived from a validated spectrum).
    pub(crate) fn from_validated_parts(mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        debug_assert_eq!(mz.len(), intensity.len());
        debug_assert!(!mz.is_empty());
        Self { mz, intensity }
    }

    /// New spectrum on the same mass grid with replaced intensities.
    pub(crate) fn with_intensities(&self, intensity: Vec<f64>) -> Self {
        debug_assert_eq!(self.mz.len(), intensity.len());
        Self {
            mz: self.mz.clone(),
            intensity,
        }
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction requires >= 1 point; kept for API completeness.
        self.mz.is_empty()
    }

    pub fn mzs(&self) -> &[f64] {
        &self.mz
    }

    pub fn intensities(&self) -> &[f64] {
        &self.intensity
    }

    /// Intensities linearly interpolated onto `grid`.
    ///
    /// Grid points outside this spectrum's mass range take the nearest edge
    /// intensity (constant extrapolation), so a slightly shorter replicate
    /// contributes its boundary value rather than an artificial zero step.
    pub fn resample_to(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&m| self.interpolate_at(m)).collect()
    }

    fn interpolate_at(&self, m: f64) -> f64 {
        let idx = self.mz.partition_point(|&x| x < m);
        if idx == 0 {
            return self.intensity[0];
        }
        if idx == self.mz.len() {
            return self.intensity[self.mz.len() - 1];
        }
        let (m0, m1) = (self.mz[idx - 1], self.mz[idx]);
        let (y0, y1) = (self.intensity[idx - 1], self.intensity[idx]);
        let frac = (m - m0) / (m1 - m0);
        y0 + frac * (y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = Spectrum::try_new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            StageError::MismatchedArrayLengths { mz: 2, intensity: 1 }
        );
    }

    #[test]
    fn test_rejects_empty() {
        let err = Spectrum::try_new(vec![], vec![]).unwrap_err();
        assert_eq!(err, StageError::EmptySpectrum);
    }

    #[test]
    fn test_rejects_duplicate_and_unsorted_mz() {
        let err = Spectrum::try_new(vec![1.0, 1.0], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(err, StageError::NonIncreasingMz { index: 1 });

        let err = Spectrum::try_new(vec![2.0, 1.0], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(err, StageError::NonIncreasingMz { index: 1 });
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Spectrum::try_new(vec![1.0, 2.0], vec![0.0, f64::NAN]).unwrap_err();
        assert_eq!(err, StageError::NonFiniteValue { index: 1 });
    }

    #[test]
    fn test_interpolation_matching_grid_is_identity() {
        let s = Spectrum::try_new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]).unwrap();
        let resampled = s.resample_to(&[1.0, 2.0, 3.0]);
        assert_eq!(resampled, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_interpolation_midpoints_and_edges() {
        let s = Spectrum::try_new(vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 40.0]).unwrap();
        let resampled = s.resample_to(&[0.5, 1.5, 2.5, 3.5]);
        assert_eq!(resampled, vec![10.0, 15.0, 30.0, 40.0]);
    }
}
