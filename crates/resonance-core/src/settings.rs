// Settings written back to the machine configuration after calibration

use crate::{error::CalibrationError, shaper::ShaperType};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Configuration section holding the shaper settings.
pub const SECTION: &str = "input_shaper";

/// Which axis a calibration applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
    /// Both X and Y receive the same shaper
    Xy,
}

impl Axis {
    /// Parse axis from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            "xy" => Some(Axis::Xy),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::Xy => "xy",
        }
    }

    /// Single axes this selection expands to.
    pub fn expand(self) -> &'static [Axis] {
        match self {
            Axis::X => &[Axis::X],
            Axis::Y => &[Axis::Y],
            Axis::Z => &[Axis::Z],
            Axis::Xy => &[Axis::X, Axis::Y],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CalibrationError::UnknownAxis(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(text) => f.write_str(text),
            SettingValue::Number(value) => write!(f, "{value:.1}"),
        }
    }
}

/// Key/value pairs persisting `shaper` at `freq` for `axis`.
///
/// Frequencies are rounded to one decimal.
pub fn shaper_settings(axis: Axis, shaper: ShaperType, freq: f64) -> Vec<(String, SettingValue)> {
    axis.expand()
        .iter()
        .flat_map(|axis| {
            [
                (
                    format!("shaper_type_{axis}"),
                    SettingValue::Text(shaper.name().to_string()),
                ),
                (
                    format!("shaper_freq_{axis}"),
                    SettingValue::Number((freq * 10.0).round() / 10.0),
                ),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parse() {
        assert_eq!(Axis::parse("x"), Some(Axis::X));
        assert_eq!(Axis::parse("XY"), Some(Axis::Xy));
        assert_eq!(Axis::parse("z"), Some(Axis::Z));
        assert_eq!(Axis::parse("w"), None);
        assert_eq!("e".parse::<Axis>(), Err(CalibrationError::UnknownAxis("e".into())));
    }

    #[test]
    fn single_axis_settings() {
        let settings = shaper_settings(Axis::Y, ShaperType::Mzv, 42.26);
        assert_eq!(
            settings,
            vec![
                ("shaper_type_y".to_string(), SettingValue::Text("mzv".into())),
                ("shaper_freq_y".to_string(), SettingValue::Number(42.3)),
            ]
        );
        assert_eq!(settings[1].1.to_string(), "42.3");
    }

    #[test]
    fn xy_expands_to_both_axes() {
        let keys: Vec<String> = shaper_settings(Axis::Xy, ShaperType::Ei, 50.0)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            keys,
            vec!["shaper_type_x", "shaper_freq_x", "shaper_type_y", "shaper_freq_y"]
        );
    }
}
