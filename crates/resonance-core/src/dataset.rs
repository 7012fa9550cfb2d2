//! Per-axis PSD curves over a shared frequency grid.

use crate::{
    error::{CalibrationError, Result},
    numeric,
};
use serde::Serialize;

/// Bins below this frequency are discarded before fitting.
pub const MIN_FREQ: f64 = 10.0;

/// Offset added to every frequency when normalizing, keeping 0 Hz finite.
const NORMALIZE_OFFSET: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalibrationData {
    pub freq_bins: Vec<f64>,
    pub psd_x: Vec<f64>,
    pub psd_y: Vec<f64>,
    pub psd_z: Vec<f64>,
    pub psd_sum: Vec<f64>,
    normalized: bool,
}

impl CalibrationData {
    /// Builds a dataset; `psd_sum` is the elementwise sum of the axes.
    pub fn new(
        freq_bins: Vec<f64>,
        psd_x: Vec<f64>,
        psd_y: Vec<f64>,
        psd_z: Vec<f64>,
    ) -> Result<Self> {
        for psd in [&psd_x, &psd_y, &psd_z] {
            check_len(freq_bins.len(), psd.len())?;
        }
        let psd_sum = psd_x
            .iter()
            .zip(&psd_y)
            .zip(&psd_z)
            .map(|((x, y), z)| x + y + z)
            .collect();
        Ok(Self {
            freq_bins,
            psd_x,
            psd_y,
            psd_z,
            psd_sum,
            normalized: false,
        })
    }

    pub fn len(&self) -> usize {
        self.freq_bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq_bins.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Linearly resamples all four curves onto `freq_bins`.
    pub fn resample(&self, freq_bins: &[f64]) -> CalibrationData {
        let at = |psd: &[f64]| numeric::interp(freq_bins, &self.freq_bins, psd);
        CalibrationData {
            freq_bins: freq_bins.to_vec(),
            psd_x: at(&self.psd_x),
            psd_y: at(&self.psd_y),
            psd_z: at(&self.psd_z),
            psd_sum: at(&self.psd_sum),
            normalized: self.normalized,
        }
    }

    /// Merges another recording, keeping the worst case of each curve.
    ///
    /// `other` is interpolated onto this dataset's grid, so the grid of
    /// `self` is retained.
    pub fn join(&mut self, other: &CalibrationData) -> Result<()> {
        if self.normalized != other.normalized {
            return Err(CalibrationError::NormalizationMismatch);
        }
        let other = other.resample(&self.freq_bins);
        self.psd_x = numeric::maximum(&self.psd_x, &other.psd_x);
        self.psd_y = numeric::maximum(&self.psd_y, &other.psd_y);
        self.psd_z = numeric::maximum(&self.psd_z, &other.psd_z);
        self.psd_sum = numeric::maximum(&self.psd_sum, &other.psd_sum);
        Ok(())
    }

    /// De-emphasizes low-frequency energy and drops bins below
    /// [`MIN_FREQ`]. Applied exactly once, before fitting.
    pub fn normalize(&mut self) -> Result<()> {
        if self.normalized {
            return Err(CalibrationError::AlreadyNormalized);
        }
        let freq_bins = &self.freq_bins;
        for psd in [
            &mut self.psd_sum,
            &mut self.psd_x,
            &mut self.psd_y,
            &mut self.psd_z,
        ] {
            for (value, &freq) in psd.iter_mut().zip(freq_bins) {
                *value = if freq < MIN_FREQ {
                    0.0
                } else {
                    *value / (freq + NORMALIZE_OFFSET)
                };
            }
        }
        self.normalized = true;
        Ok(())
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CalibrationError::LengthMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        psd::PsdEstimator,
        testing::{sine_samples, two_tone_samples},
    };
    use approx::assert_abs_diff_eq;

    fn flat(freq_bins: &[f64], value: f64) -> CalibrationData {
        let n = freq_bins.len();
        CalibrationData::new(
            freq_bins.to_vec(),
            vec![value; n],
            vec![2.0 * value; n],
            vec![0.0; n],
        )
        .unwrap()
    }

    #[test]
    fn rejects_mismatched_curves() {
        let err = CalibrationData::new(vec![0.0, 1.0], vec![1.0], vec![1.0, 1.0], vec![1.0, 1.0])
            .unwrap_err();
        assert_eq!(
            err,
            CalibrationError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn normalize_divides_and_clears_low_bins() {
        let mut data = flat(&[0.0, 5.0, 9.9, 10.0, 19.9], 1.0);
        data.normalize().unwrap();
        assert_eq!(&data.psd_x[..3], &[0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(data.psd_x[3], 1.0 / 10.1, epsilon = 1e-15);
        assert_abs_diff_eq!(data.psd_x[4], 1.0 / 20.0, epsilon = 1e-15);
        assert_abs_diff_eq!(data.psd_sum[4], 3.0 / 20.0, epsilon = 1e-15);
        assert!(data.is_normalized());
        assert_eq!(data.normalize(), Err(CalibrationError::AlreadyNormalized));
    }

    #[test]
    fn join_resamples_onto_own_grid() {
        let mut a = flat(&[0.0, 10.0, 20.0, 30.0], 1.0);
        let mut b = flat(&[0.0, 20.0, 40.0], 0.0);
        b.psd_x = vec![0.0, 4.0, 0.0];
        b.psd_sum = vec![0.0, 4.0, 0.0];
        a.join(&b).unwrap();
        assert_eq!(a.freq_bins, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(a.psd_x, vec![1.0, 2.0, 4.0, 2.0]);
        assert_eq!(a.psd_y, vec![2.0; 4]);
        assert_eq!(a.psd_sum, vec![3.0, 3.0, 4.0, 3.0]);
    }

    #[test]
    fn join_never_decreases() {
        let estimator = PsdEstimator::default();
        let a = estimator
            .calc_freq_response(&sine_samples(40.0, 1000.0, 2.0))
            .unwrap();
        let b = estimator
            .calc_freq_response(&two_tone_samples(25.0, 70.0, 1300.0, 1.5))
            .unwrap();

        let mut joined = a.clone();
        joined.join(&b).unwrap();
        let b_on_a = b.resample(&a.freq_bins);
        for i in 0..joined.len() {
            for (merged, left, right) in [
                (&joined.psd_x, &a.psd_x, &b_on_a.psd_x),
                (&joined.psd_y, &a.psd_y, &b_on_a.psd_y),
                (&joined.psd_z, &a.psd_z, &b_on_a.psd_z),
                (&joined.psd_sum, &a.psd_sum, &b_on_a.psd_sum),
            ] {
                assert!(merged[i] >= left[i]);
                assert!(merged[i] >= right[i]);
            }
        }
    }

    #[test]
    fn join_requires_matching_normalization() {
        let mut raw = flat(&[0.0, 10.0, 20.0], 1.0);
        let mut normalized = raw.clone();
        normalized.normalize().unwrap();
        assert_eq!(
            raw.join(&normalized),
            Err(CalibrationError::NormalizationMismatch)
        );
    }
}
