use serde::{
    Deserialize,
    Serialize,
};

/// A discrete peak extracted from a processed spectrum.
///
/// Peaks are derived, read-only values owned by the pipeline run that
/// produced them. `snr` is the intensity at the apex divided by the local
/// robust noise estimate used to accept the peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
    pub snr: f64,
}
