// Input shaper models and their frequency response

use crate::{error::CalibrationError, numeric};
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, fmt, str::FromStr};

// Submodules for each family of shapers
pub mod ei;
pub mod mzv;
pub mod zv;

/// Vibration tolerance of the extra-insensitive shapers.
pub const EI_VIBRATION_TOLERANCE: f64 = 0.05;

/// A sequence of scaled, time-delayed impulses.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ImpulseTrain {
    pub amplitudes: Vec<f64>,
    pub times: Vec<f64>,
}

impl ImpulseTrain {
    pub fn new(amplitudes: Vec<f64>, times: Vec<f64>) -> Self {
        Self { amplitudes, times }
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Time of the last impulse.
    pub fn duration(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Terms shared by the closed-form shapers: the per-half-period decay
/// `K` and the damped period `t_d`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DampedPeriod {
    pub k: f64,
    pub t_d: f64,
}

impl DampedPeriod {
    /// `decay_scale` multiplies the exponent of `K` (MZV uses 0.75).
    pub fn new(shaper_freq: f64, damping_ratio: f64, decay_scale: f64) -> Self {
        let df = (1.0 - damping_ratio * damping_ratio).sqrt();
        let k = (-decay_scale * damping_ratio * PI / df).exp();
        let t_d = 1.0 / (shaper_freq * df);
        Self { k, t_d }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaperType {
    #[serde(rename = "zv")]
    Zv,
    #[serde(rename = "zvd")]
    Zvd,
    #[serde(rename = "mzv")]
    Mzv,
    #[serde(rename = "ei")]
    Ei,
    #[serde(rename = "2hump_ei")]
    TwoHumpEi,
    #[serde(rename = "3hump_ei")]
    ThreeHumpEi,
}

impl ShaperType {
    /// Every model in the library.
    pub const ALL: [ShaperType; 6] = [
        ShaperType::Zv,
        ShaperType::Zvd,
        ShaperType::Mzv,
        ShaperType::Ei,
        ShaperType::TwoHumpEi,
        ShaperType::ThreeHumpEi,
    ];

    /// Models tried by the selection policy, in increasing complexity.
    pub const DEFAULT_ORDER: [ShaperType; 5] = [
        ShaperType::Zv,
        ShaperType::Mzv,
        ShaperType::Ei,
        ShaperType::TwoHumpEi,
        ShaperType::ThreeHumpEi,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ShaperType::Zv => "zv",
            ShaperType::Zvd => "zvd",
            ShaperType::Mzv => "mzv",
            ShaperType::Ei => "ei",
            ShaperType::TwoHumpEi => "2hump_ei",
            ShaperType::ThreeHumpEi => "3hump_ei",
        }
    }

    /// Lowest frequency the model is fitted at.
    pub const fn min_freq(self) -> f64 {
        match self {
            ShaperType::Zv => 15.0,
            ShaperType::Zvd => 20.0,
            ShaperType::Mzv => 25.0,
            ShaperType::Ei => 30.0,
            ShaperType::TwoHumpEi => 37.5,
            ShaperType::ThreeHumpEi => 50.0,
        }
    }

    pub fn generate(self, shaper_freq: f64, damping_ratio: f64) -> ImpulseTrain {
        match self {
            ShaperType::Zv => zv::zv(shaper_freq, damping_ratio),
            ShaperType::Zvd => zv::zvd(shaper_freq, damping_ratio),
            ShaperType::Mzv => mzv::mzv(shaper_freq, damping_ratio),
            ShaperType::Ei => ei::ei(shaper_freq, damping_ratio),
            ShaperType::TwoHumpEi => ei::two_hump_ei(shaper_freq, damping_ratio),
            ShaperType::ThreeHumpEi => ei::three_hump_ei(shaper_freq, damping_ratio),
        }
    }

    /// Parse a shaper name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|shaper| shaper.name() == s)
    }
}

impl fmt::Display for ShaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaperType {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CalibrationError::UnknownShaper(s.to_string()))
    }
}

/// Residual vibration ratio of `shaper` at each frequency in `freqs`,
/// for a system with `test_damping_ratio`.
pub fn estimate_shaper(shaper: &ImpulseTrain, test_damping_ratio: f64, freqs: &[f64]) -> Vec<f64> {
    let inv_d = 1.0 / shaper.amplitudes.iter().sum::<f64>();
    let t_last = shaper.duration();
    let df = (1.0 - test_damping_ratio * test_damping_ratio).sqrt();

    freqs
        .iter()
        .map(|&freq| {
            let omega = 2.0 * PI * freq;
            let damping = test_damping_ratio * omega;
            let omega_d = omega * df;
            let (mut s, mut c) = (0.0, 0.0);
            for (&a, &t) in shaper.amplitudes.iter().zip(&shaper.times) {
                let w = a * (-damping * (t_last - t)).exp();
                let (sin, cos) = (omega_d * t).sin_cos();
                s += w * sin;
                c += w * cos;
            }
            (s * s + c * c).sqrt() * inv_d
        })
        .collect()
}

/// PSD-weighted fraction of vibration left after shaping, together with
/// the response curve it was computed from.
pub fn estimate_remaining_vibrations(
    shaper: &ImpulseTrain,
    test_damping_ratio: f64,
    freq_bins: &[f64],
    psd: &[f64],
) -> (f64, Vec<f64>) {
    let vals = estimate_shaper(shaper, test_damping_ratio, freq_bins);
    let weighted: Vec<f64> = vals.iter().zip(psd).map(|(v, p)| v * p).collect();
    let remaining = numeric::trapezoid(&weighted, freq_bins) / numeric::trapezoid(psd, freq_bins);
    (remaining, vals)
}
