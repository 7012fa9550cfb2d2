//! Synthetic recordings shared by the unit tests.

use crate::psd::Sample;
use std::f64::consts::PI;

/// Unit-amplitude sine on X only, sampled at `rate` for `duration` seconds.
pub fn sine_samples(freq: f64, rate: f64, duration: f64) -> Vec<Sample> {
    let count = (rate * duration).round() as usize;
    (0..count)
        .map(|i| {
            let t = i as f64 / rate;
            Sample::new(t, (2.0 * PI * freq * t).sin(), 0.0, 0.0)
        })
        .collect()
}

/// One tone on X and another on Y.
pub fn two_tone_samples(fx: f64, fy: f64, rate: f64, duration: f64) -> Vec<Sample> {
    let count = (rate * duration).round() as usize;
    (0..count)
        .map(|i| {
            let t = i as f64 / rate;
            Sample::new(
                t,
                (2.0 * PI * fx * t).sin(),
                0.7 * (2.0 * PI * fy * t).sin(),
                0.05 * (2.0 * PI * 3.0 * fx * t).cos(),
            )
        })
        .collect()
}

pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub fn nearest_bin(freq_bins: &[f64], freq: f64) -> usize {
    freq_bins
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - freq).abs().total_cmp(&(b.1 - freq).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
