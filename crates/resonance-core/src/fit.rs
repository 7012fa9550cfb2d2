//! Frequency search for a single shaper model.
//!
//! Every candidate frequency is scored by the worst residual vibration
//! over a set of plausible damping ratios, since the true damping of the
//! machine is unknown. The candidate with the lowest score wins.

use crate::{
    dataset::CalibrationData,
    error::{CalibrationError, Result},
    numeric,
    shaper::{ShaperType, estimate_remaining_vibrations},
};
use serde::{Deserialize, Serialize};

/// Search and scoring parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Highest frequency a shaper is tuned to
    #[serde(default = "default_max_shaper_freq")]
    pub max_shaper_freq: f64,

    /// Highest frequency included in the vibration integral
    #[serde(default = "default_max_freq")]
    pub max_freq: f64,

    /// Damping ratio the shapers are generated with
    #[serde(default = "default_shaper_damping_ratio")]
    pub shaper_damping_ratio: f64,

    /// Damping ratios the machine is assumed to possibly have
    #[serde(default = "default_test_damping_ratios")]
    pub test_damping_ratios: Vec<f64>,

    /// Models to fit, in the order the selection policy sees them
    #[serde(default = "default_shapers")]
    pub shapers: Vec<ShaperType>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_shaper_freq: default_max_shaper_freq(),
            max_freq: default_max_freq(),
            shaper_damping_ratio: default_shaper_damping_ratio(),
            test_damping_ratios: default_test_damping_ratios(),
            shapers: default_shapers(),
        }
    }
}

pub const MAX_SHAPER_FREQ: f64 = 150.0;
pub const MAX_FREQ: f64 = 200.0;
pub const SHAPER_DAMPING_RATIO: f64 = 0.1;
pub const TEST_DAMPING_RATIOS: [f64; 3] = [0.075, 0.1, 0.15];

fn default_max_shaper_freq() -> f64 {
    MAX_SHAPER_FREQ
}

fn default_max_freq() -> f64 {
    MAX_FREQ
}

fn default_shaper_damping_ratio() -> f64 {
    SHAPER_DAMPING_RATIO
}

fn default_test_damping_ratios() -> Vec<f64> {
    TEST_DAMPING_RATIOS.to_vec()
}

fn default_shapers() -> Vec<ShaperType> {
    ShaperType::DEFAULT_ORDER.to_vec()
}

/// Best tuning found for one shaper model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitResult {
    pub shaper: ShaperType,
    pub frequency: f64,
    /// Fraction of vibration energy left after shaping, in `[0, 1]`
    pub vibrations: f64,
    /// Worst-case response over the test damping ratios, one value per
    /// frequency bin up to `max_freq`
    pub response: Vec<f64>,
}

impl FitResult {
    pub fn name(&self) -> &'static str {
        self.shaper.name()
    }
}

/// Candidate tuning frequencies for a model: every bin inside
/// `[min_freq, max_shaper_freq]` plus the midpoints between them.
pub fn candidate_freqs(freq_bins: &[f64], min_freq: f64, max_shaper_freq: f64) -> Vec<f64> {
    let bins: Vec<f64> = freq_bins
        .iter()
        .copied()
        .filter(|&f| f >= min_freq && f <= max_shaper_freq)
        .collect();
    let mut freqs: Vec<f64> = bins.windows(2).map(|w| (w[0] + w[1]) * 0.5).collect();
    freqs.extend_from_slice(&bins);
    freqs.sort_by(f64::total_cmp);
    freqs
}

/// Fits `shaper` against the combined PSD of `data`.
pub fn fit_shaper(
    shaper: ShaperType,
    data: &CalibrationData,
    config: &FitConfig,
) -> Result<FitResult> {
    fit_shaper_psd(shaper, &data.freq_bins, &data.psd_sum, config)
}

/// Fits `shaper` against an arbitrary PSD curve sampled at `freq_bins`.
pub fn fit_shaper_psd(
    shaper: ShaperType,
    freq_bins: &[f64],
    psd: &[f64],
    config: &FitConfig,
) -> Result<FitResult> {
    if freq_bins.len() != psd.len() {
        return Err(CalibrationError::LengthMismatch {
            expected: freq_bins.len(),
            actual: psd.len(),
        });
    }
    let test_freqs = candidate_freqs(freq_bins, shaper.min_freq(), config.max_shaper_freq);
    if test_freqs.is_empty() {
        return Err(CalibrationError::NoCandidateFrequencies {
            shaper: shaper.name(),
        });
    }

    let clipped = freq_bins
        .iter()
        .take_while(|&&f| f <= config.max_freq)
        .count();
    let (freq_bins, psd) = (&freq_bins[..clipped], &psd[..clipped]);

    let best = search_from_top(&test_freqs, |test_freq| {
        let train = shaper.generate(test_freq, config.shaper_damping_ratio);
        let mut vibrations = 0.0f64;
        let mut response = vec![0.0; freq_bins.len()];
        for &damping_ratio in &config.test_damping_ratios {
            let (remaining, vals) =
                estimate_remaining_vibrations(&train, damping_ratio, freq_bins, psd);
            if !remaining.is_finite() {
                return Err(CalibrationError::ComputeFailure {
                    stage: "shaper fitting",
                });
            }
            response = numeric::maximum(&response, &vals);
            vibrations = vibrations.max(remaining);
        }
        Ok((vibrations, response))
    })?;

    let (frequency, vibrations, response) = best.ok_or(CalibrationError::NoCandidateFrequencies {
        shaper: shaper.name(),
    })?;
    Ok(FitResult {
        shaper,
        frequency,
        vibrations,
        response,
    })
}

/// Scores `test_freqs` from the highest down and keeps the lowest score,
/// along with whatever the scorer computed for it.
fn search_from_top<R>(
    test_freqs: &[f64],
    mut score: impl FnMut(f64) -> Result<(f64, R)>,
) -> Result<Option<(f64, f64, R)>> {
    let mut best: Option<(f64, f64, R)> = None;
    for &test_freq in test_freqs.iter().rev() {
        let (vibrations, extra) = score(test_freq)?;
        if replaces_best(best.as_ref().map(|(_, v, _)| *v), vibrations) {
            best = Some((test_freq, vibrations, extra));
        }
    }
    Ok(best)
}

/// Only a strict improvement replaces the best, so exact ties keep the
/// higher frequency visited first. Existing calibrations depend on this
/// bias; ties must not be broken toward the lower frequency.
fn replaces_best(best: Option<f64>, vibrations: f64) -> bool {
    best.is_none_or(|best| vibrations < best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{psd::PsdEstimator, testing::sine_samples};

    fn resonance_at(freq: f64) -> CalibrationData {
        let mut data = PsdEstimator::default()
            .calc_freq_response(&sine_samples(freq, 1000.0, 2.0))
            .unwrap();
        data.normalize().unwrap();
        data
    }

    #[test]
    fn candidates_include_midpoints() {
        let bins = [0.0, 10.0, 20.0, 30.0, 40.0, 200.0];
        assert_eq!(
            candidate_freqs(&bins, 15.0, 150.0),
            vec![20.0, 25.0, 30.0, 35.0, 40.0]
        );
        assert_eq!(candidate_freqs(&bins, 20.0, 20.0), vec![20.0]);
        assert!(candidate_freqs(&bins, 41.0, 150.0).is_empty());
    }

    #[test]
    fn zv_fits_synthetic_resonance() {
        let data = resonance_at(40.0);
        let fit = fit_shaper(ShaperType::Zv, &data, &FitConfig::default()).unwrap();
        assert!((fit.frequency - 40.0).abs() <= 2.0, "{}", fit.frequency);
        assert!(fit.vibrations < 0.5, "{}", fit.vibrations);
        assert!(fit.vibrations >= 0.0);
    }

    #[test]
    fn response_is_clipped_to_max_freq() {
        let data = resonance_at(40.0);
        let config = FitConfig::default();
        let fit = fit_shaper(ShaperType::Mzv, &data, &config).unwrap();
        let expected = data.freq_bins.iter().filter(|&&f| f <= config.max_freq).count();
        assert_eq!(fit.response.len(), expected);
        assert!(fit.response.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn fitting_is_deterministic() {
        let data = resonance_at(55.0);
        let config = FitConfig::default();
        for shaper in ShaperType::DEFAULT_ORDER {
            let a = fit_shaper(shaper, &data, &config).unwrap();
            let b = fit_shaper(shaper, &data, &config).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn only_strict_improvement_replaces_best() {
        assert!(replaces_best(None, 0.5));
        assert!(replaces_best(Some(0.5), 0.49));
        assert!(!replaces_best(Some(0.5), 0.5));
        assert!(!replaces_best(Some(0.5), 0.51));
    }

    #[test]
    fn exact_ties_keep_highest_frequency() {
        let freqs = [20.0, 25.0, 30.0, 35.0, 40.0];
        let mut visited = Vec::new();
        let best = search_from_top(&freqs, |freq| {
            visited.push(freq);
            Ok((0.25, freq))
        })
        .unwrap();
        assert_eq!(visited, vec![40.0, 35.0, 30.0, 25.0, 20.0]);
        assert_eq!(best, Some((40.0, 0.25, 40.0)));
    }

    #[test]
    fn tied_minimum_below_the_top_keeps_first_visited() {
        let freqs = [20.0, 25.0, 30.0, 35.0, 40.0];
        let scores = |freq: f64| if freq == 25.0 || freq == 35.0 { 0.1 } else { 0.3 };
        let best = search_from_top(&freqs, |freq| Ok((scores(freq), ()))).unwrap();
        assert_eq!(best.map(|(freq, vibrations, _)| (freq, vibrations)), Some((35.0, 0.1)));
    }

    #[test]
    fn scoring_errors_stop_the_search() {
        let err = search_from_top(&[10.0, 20.0], |_| {
            Err::<(f64, ()), _>(CalibrationError::ComputeFailure {
                stage: "shaper fitting",
            })
        })
        .unwrap_err();
        assert_eq!(
            err,
            CalibrationError::ComputeFailure {
                stage: "shaper fitting"
            }
        );
    }

    #[test]
    fn zero_psd_is_a_compute_failure() {
        let freq_bins: Vec<f64> = (0..=20).map(|i| i as f64 * 10.0).collect();
        let psd = vec![0.0; freq_bins.len()];
        assert_eq!(
            fit_shaper_psd(ShaperType::Zv, &freq_bins, &psd, &FitConfig::default()),
            Err(CalibrationError::ComputeFailure {
                stage: "shaper fitting"
            })
        );
    }

    #[test]
    fn rejects_grid_without_candidates() {
        let freq_bins = [0.0, 5.0, 10.0];
        let psd = [1.0, 1.0, 1.0];
        assert_eq!(
            fit_shaper_psd(ShaperType::Ei, &freq_bins, &psd, &FitConfig::default()),
            Err(CalibrationError::NoCandidateFrequencies { shaper: "ei" })
        );
    }
}
