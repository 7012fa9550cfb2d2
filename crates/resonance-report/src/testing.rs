use resonance_core::{CalibrationData, FitResult, ShaperType};

/// Convenience helper for snapshotting parse failures.
pub fn parse_error_from_str(input: &str) -> String {
    match crate::parse(input) {
        Ok(report) => format!("parsed {} rows", report.freq_bins.len()),
        Err(err) => format!("parse error: {err}"),
    }
}

/// Small dataset with one bin at and one above the report limit.
pub fn sample_data() -> CalibrationData {
    CalibrationData::new(
        vec![0.0, 12.5, 25.0, 200.0, 212.5],
        vec![1.0, 1.23456e-4, 2.5e7, 1.0, 1.0],
        vec![0.0, 2.0e-6, 0.0, 0.0, 0.0],
        vec![0.5, 0.0, 3.0, 0.0, 0.0],
    )
    .expect("curves match the grid")
}

pub fn sample_fit() -> FitResult {
    FitResult {
        shaper: ShaperType::Zv,
        frequency: 25.04,
        vibrations: 0.1,
        response: vec![1.0, 0.5, 0.01234, 0.9],
    }
}
