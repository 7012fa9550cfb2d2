//! Input shaper calibration engine.
//!
//! Turns raw accelerometer recordings into a power spectral density,
//! fits every input shaper model against it and picks the one that best
//! cancels the measured resonance. Everything in here is a pure function
//! of its inputs; file formats, workers and persistence live in the host
//! crates.

pub mod dataset;
pub mod error;
pub mod fit;
pub mod numeric;
pub mod psd;
pub mod select;
pub mod settings;
pub mod shaper;

#[cfg(test)]
mod testing;

pub use dataset::{CalibrationData, MIN_FREQ};
pub use error::{CalibrationError, Result};
pub use fit::{FitConfig, FitResult, fit_shaper};
pub use numeric::{NumericOps, RustFftOps};
pub use psd::{PsdEstimator, Sample};
pub use select::{SelectionResult, find_best_shaper, select_shaper};
pub use settings::{Axis, SettingValue};
pub use shaper::{ImpulseTrain, ShaperType};
