/// Scientific notation with `precision` fractional digits and a signed,
/// at least two-digit exponent (`1.234e-05`).
pub fn format_sci(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let raw = format!("{value:.precision$e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_printf_style() {
        assert_eq!(format_sci(0.0, 3), "0.000e+00");
        assert_eq!(format_sci(1.0, 3), "1.000e+00");
        assert_eq!(format_sci(1234.5678, 3), "1.235e+03");
        assert_eq!(format_sci(0.000123456, 3), "1.235e-04");
        assert_eq!(format_sci(-2.5e-12, 3), "-2.500e-12");
        assert_eq!(format_sci(6.02e123, 2), "6.02e+123");
        assert_eq!(format_sci(f64::NAN, 3), "nan");
        assert_eq!(format_sci(f64::NEG_INFINITY, 3), "-inf");
    }
}
