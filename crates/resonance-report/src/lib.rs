//! Calibration report writer and parser.
//!
//! The report is a comma-separated table with one row per frequency bin
//! below the integration limit: the four PSD curves followed by the
//! response curve of every fitted shaper. The table ends early when a
//! response curve was clipped to a lower limit.

mod format;
mod parser;
mod writer;

pub use format::format_sci;
pub use parser::{Report, ShaperColumn, load, parse};
pub use writer::{format_report, save, write_report};

use std::{num::ParseFloatError, path::PathBuf};
use thiserror::Error;

/// Leading columns of every report.
pub const BASE_COLUMNS: [&str; 5] = ["freq", "psd_x", "psd_y", "psd_z", "psd_xyz"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report")]
    Write(#[from] std::io::Error),

    #[error("failed to access report file {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed report table")]
    Csv(#[from] csv::Error),

    #[error("report header is missing")]
    MissingHeader,

    #[error("unexpected column '{found}' at position {index}, expected '{expected}'")]
    UnexpectedColumn {
        index: usize,
        found: String,
        expected: &'static str,
    },

    #[error("invalid shaper column '{raw}'")]
    InvalidShaperColumn { raw: String },

    #[error("expected {expected} fields on line {line}, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("invalid number '{raw}' at line {line}, column {column}")]
    InvalidNumber {
        line: u64,
        column: usize,
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

#[cfg(test)]
mod testing;
