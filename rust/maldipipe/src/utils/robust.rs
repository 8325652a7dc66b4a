//! Robust dispersion estimators used by the peak detector.

/// Median of `values`, sorting the slice in place.
///
/// Even-length inputs average the two middle values.
pub fn median_in_place(values: &mut [f64]) -> f64 {
    debug_assert!(!values.is_empty());
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Median absolute deviation of `values`.
///
/// `scratch` is a caller-owned buffer reused across calls so windowed
/// evaluation over a whole spectrum does not allocate per position.
pub fn mad(values: &[f64], scratch: &mut Vec<f64>) -> f64 {
    scratch.clear();
    scratch.extend_from_slice(values);
    let center = median_in_place(scratch);
    for v in scratch.iter_mut() {
        *v = (*v - center).abs();
    }
    median_in_place(scratch)
}
