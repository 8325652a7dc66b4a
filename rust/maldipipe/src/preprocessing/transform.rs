use crate::models::Spectrum;

/// Variance-stabilizing square-root transform.
///
/// Raw instrument counts are non-negative; anything below zero is upstream
/// noise and is clamped before the root is taken, so this stage cannot fail.
pub fn sqrt_transform(spectrum: &Spectrum) -> Spectrum {
    let intensity = spectrum
        .intensities()
        .iter()
        .map(|&x| x.max(0.0).sqrt())
        .collect();
    spectrum.with_intensities(intensity)
}
