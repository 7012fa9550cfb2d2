//! Array and FFT primitives consumed by the estimator and the fitter.
//!
//! The spectral estimator draws its per-segment FFT and mean from an
//! injected [`NumericOps`] provider. Interpolation, elementwise maximum
//! and integration are plain functions over slices.

use parking_lot::Mutex;
use rustfft::{FftPlanner, num_complex::Complex};

/// Injectable numeric capability of the PSD estimator.
pub trait NumericOps: Send + Sync {
    /// One-sided spectrum of a real signal: bins `0..=n/2` of its DFT.
    fn rfft(&self, input: &[f64]) -> Vec<Complex<f64>>;

    fn mean(&self, values: &[f64]) -> f64 {
        mean(values)
    }
}

/// Default provider backed by `rustfft`.
pub struct RustFftOps {
    planner: Mutex<FftPlanner<f64>>,
}

impl Default for RustFftOps {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFftOps {
    pub fn new() -> Self {
        Self {
            planner: Mutex::new(FftPlanner::new()),
        }
    }
}

impl NumericOps for RustFftOps {
    fn rfft(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let n = input.len();
        if n == 0 {
            return Vec::new();
        }
        // Plans are cached inside the planner, so only the lookup is locked.
        let fft = self.planner.lock().plan_fft_forward(n);
        let mut buffer: Vec<Complex<f64>> =
            input.iter().map(|&v| Complex::new(v, 0.0)).collect();
        fft.process(&mut buffer);
        buffer.truncate(n / 2 + 1);
        buffer
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Piecewise-linear interpolation of `(xp, fp)` at the points `x`.
///
/// `xp` must be ascending. Points outside the range clamp to the first
/// and last sample.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    let len = xp.len().min(fp.len());
    if len == 0 {
        return vec![f64::NAN; x.len()];
    }
    let (xp, fp) = (&xp[..len], &fp[..len]);
    x.iter()
        .map(|&v| {
            if v <= xp[0] {
                return fp[0];
            }
            if v >= xp[len - 1] {
                return fp[len - 1];
            }
            // first index with xp[hi] > v; 1 <= hi <= len - 1 here
            let hi = xp.partition_point(|&p| p <= v);
            let lo = hi - 1;
            let span = xp[hi] - xp[lo];
            if span == 0.0 {
                return fp[hi];
            }
            let t = (v - xp[lo]) / span;
            fp[lo] + t * (fp[hi] - fp[lo])
        })
        .collect()
}

pub fn maximum(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(&a, &b)| a.max(b)).collect()
}

/// Trapezoidal integral of `y` sampled at `x`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(y, x)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}
