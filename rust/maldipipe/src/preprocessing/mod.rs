//! The six preprocessing stages, applied in order by the pipeline:
//! replicate averaging, range trimming, variance stabilization,
//! Savitzky-Golay smoothing, SNIP baseline removal and TIC calibration.

pub mod averaging;
pub mod baseline;
pub mod calibration;
pub mod smoothing;
pub mod transform;
pub mod trimming;

pub use averaging::average_spectra;
pub use baseline::remove_baseline;
pub use calibration::calibrate_tic;
pub use smoothing::savgol_smooth;
pub use transform::sqrt_transform;
pub use trimming::trim;
