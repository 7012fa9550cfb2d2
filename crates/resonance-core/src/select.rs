//! Cross-model shaper selection.
//!
//! Models are visited from simplest to most complex. A more complex
//! model is only adopted when it clearly beats the best so far *and*
//! noticeably beats its immediate predecessor; otherwise the simpler
//! predecessor is preferred.

use crate::{
    dataset::CalibrationData,
    error::{CalibrationError, Result},
    fit::{FitConfig, FitResult, fit_shaper},
    shaper::ShaperType,
};
use serde::Serialize;

/// Required improvement over the best model so far.
pub const BEST_IMPROVEMENT_RATIO: f64 = 1.75;
/// Required improvement over the immediately preceding model.
pub const PREV_IMPROVEMENT_RATIO: f64 = 1.25;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectionResult {
    pub shaper: ShaperType,
    pub frequency: f64,
    /// Every fitted model in evaluation order
    pub fits: Vec<FitResult>,
}

impl SelectionResult {
    pub fn name(&self) -> &'static str {
        self.shaper.name()
    }

    /// The fit of the selected model.
    pub fn best_fit(&self) -> Option<&FitResult> {
        self.fits
            .iter()
            .find(|fit| fit.shaper == self.shaper && fit.frequency == self.frequency)
    }
}

/// Applies the selection policy to per-model fits given in evaluation
/// order.
pub fn select_shaper(fits: Vec<FitResult>) -> Result<SelectionResult> {
    let mut best: Option<usize> = None;
    let mut prev: Option<usize> = None;

    for (idx, fit) in fits.iter().enumerate() {
        let clears_best = match best {
            None => true,
            Some(b) => fits[b].vibrations > BEST_IMPROVEMENT_RATIO * fit.vibrations,
        };
        if clears_best {
            let clears_prev = match prev {
                None => false,
                Some(p) => fits[p].vibrations > PREV_IMPROVEMENT_RATIO * fit.vibrations,
            };
            best = if clears_prev { Some(idx) } else { prev };
        }
        prev = Some(idx);
    }

    let best = best.ok_or(CalibrationError::NoShaperSelected)?;
    let (shaper, frequency) = (fits[best].shaper, fits[best].frequency);
    Ok(SelectionResult {
        shaper,
        frequency,
        fits,
    })
}

/// Fits every configured model in order and selects among them.
pub fn find_best_shaper(data: &CalibrationData, config: &FitConfig) -> Result<SelectionResult> {
    let fits = config
        .shapers
        .iter()
        .map(|&shaper| {
            let fit = fit_shaper(shaper, data, config)?;
            log_fit(&fit);
            Ok(fit)
        })
        .collect::<Result<Vec<_>>>()?;
    let selection = select_shaper(fits)?;
    tracing::info!(
        "Recommended shaper is {} @ {:.1} Hz",
        selection.name(),
        selection.frequency
    );
    Ok(selection)
}

/// Reports a finished fit the way calibration tooling prints it.
pub fn log_fit(fit: &FitResult) {
    tracing::info!(
        "Fitted shaper '{}' frequency = {:.1} Hz (vibrations = {:.1}%)",
        fit.name(),
        fit.frequency,
        fit.vibrations * 100.0
    );
}
