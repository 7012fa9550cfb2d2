//! Power spectral density estimation using Welch's method.

use crate::{
    dataset::CalibrationData,
    error::{CalibrationError, Result},
    numeric::{NumericOps, RustFftOps},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Length of one analysis window, in seconds.
pub const WINDOW_T_SEC: f64 = 0.5;

/// A single accelerometer reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub const fn new(time: f64, x: f64, y: f64, z: f64) -> Self {
        Self { time, x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Smallest even power of two covering half a second at `sampling_freq`,
/// or `None` when that window is not addressable.
pub fn window_size(sampling_freq: f64) -> Option<usize> {
    let span = (sampling_freq * WINDOW_T_SEC).ceil().max(1.0);
    if !(span.is_finite() && span < usize::MAX as f64) {
        return None;
    }
    (span as usize).checked_next_power_of_two().map(|m| m.max(2))
}

/// Periodic Blackman window of length `n`.
pub fn blackman(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * PI * i as f64 / n as f64;
            0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
        })
        .collect()
}

/// Frequencies of the `nfft / 2 + 1` one-sided FFT bins.
pub fn rfft_freqs(nfft: usize, sampling_freq: f64) -> Vec<f64> {
    (0..=nfft / 2)
        .map(|k| k as f64 * sampling_freq / nfft as f64)
        .collect()
}

pub struct PsdEstimator<O = RustFftOps> {
    ops: O,
}

impl Default for PsdEstimator<RustFftOps> {
    fn default() -> Self {
        Self::new(RustFftOps::new())
    }
}

impl<O: NumericOps> PsdEstimator<O> {
    pub fn new(ops: O) -> Self {
        Self { ops }
    }

    /// Estimates the per-axis PSD of a recording.
    ///
    /// All three axes share the sampling rate and window length, and so
    /// the frequency grid.
    pub fn calc_freq_response(&self, samples: &[Sample]) -> Result<CalibrationData> {
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(CalibrationError::NonFiniteSample { index });
        }
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if samples.len() >= 2 => (first, last),
            _ => {
                return Err(CalibrationError::InsufficientData {
                    samples: samples.len(),
                    window: 2,
                });
            }
        };

        let n = samples.len();
        let span = last.time - first.time;
        if !(span > 0.0 && span.is_finite()) {
            return Err(CalibrationError::InvalidTimespan);
        }
        let sampling_freq = n as f64 / span;
        let nfft = window_size(sampling_freq).ok_or(CalibrationError::InvalidTimespan)?;
        if n <= nfft {
            return Err(CalibrationError::InsufficientData {
                samples: n,
                window: nfft,
            });
        }

        let axis = |get: fn(&Sample) -> f64| samples.iter().map(get).collect::<Vec<_>>();
        let (freqs, psd_x) = self.psd(&axis(|s| s.x), sampling_freq, nfft)?;
        let (_, psd_y) = self.psd(&axis(|s| s.y), sampling_freq, nfft)?;
        let (_, psd_z) = self.psd(&axis(|s| s.z), sampling_freq, nfft)?;

        tracing::debug!(
            samples = n,
            sampling_freq,
            window = nfft,
            bins = freqs.len(),
            "estimated power spectral density"
        );

        CalibrationData::new(freqs, psd_x, psd_y, psd_z)
    }

    /// Welch PSD of one signal with `nfft`-sample Blackman windows at 50%
    /// overlap. `nfft` must be even and smaller than the signal.
    pub fn psd(&self, x: &[f64], sampling_freq: f64, nfft: usize) -> Result<(Vec<f64>, Vec<f64>)> {
        if nfft < 2 || nfft % 2 != 0 || x.len() <= nfft {
            return Err(CalibrationError::InsufficientData {
                samples: x.len(),
                window: nfft,
            });
        }
        let window = blackman(nfft);
        // compensates the power lost to windowing
        let scale = 1.0 / (window.iter().map(|w| w * w).sum::<f64>() * sampling_freq);

        let overlap = nfft / 2;
        let step = nfft - overlap;
        let n_windows = (x.len() - overlap) / step;

        let mut psd = vec![0.0; nfft / 2 + 1];
        let mut segment = vec![0.0; nfft];
        for start in (0..n_windows).map(|i| i * step) {
            let chunk = &x[start..start + nfft];
            let mean = self.ops.mean(chunk);
            for ((out, &v), &w) in segment.iter_mut().zip(chunk).zip(&window) {
                *out = (v - mean) * w;
            }
            let spectrum = self.ops.rfft(&segment);
            if spectrum.len() != psd.len() {
                return Err(CalibrationError::LengthMismatch {
                    expected: psd.len(),
                    actual: spectrum.len(),
                });
            }
            let last = psd.len() - 1;
            for (k, (acc, bin)) in psd.iter_mut().zip(&spectrum).enumerate() {
                let mut power = bin.norm_sqr() * scale;
                // one-sided spectrum; DC and the unpaired Nyquist bin stay single
                if k != 0 && k != last {
                    power *= 2.0;
                }
                *acc += power;
            }
        }

        let inv = 1.0 / n_windows as f64;
        for v in &mut psd {
            *v *= inv;
        }
        if psd.iter().any(|v| !v.is_finite()) {
            return Err(CalibrationError::ComputeFailure {
                stage: "power spectral density",
            });
        }
        Ok((rfft_freqs(nfft, sampling_freq), psd))
    }
}
