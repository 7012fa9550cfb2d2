use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("insufficient data: {samples} samples do not exceed the {window}-sample analysis window")]
    InsufficientData { samples: usize, window: usize },

    #[error("samples must span a positive, finite time interval")]
    InvalidTimespan,

    #[error("sample {index} contains a non-finite value")]
    NonFiniteSample { index: usize },

    #[error("numerical failure during {stage}")]
    ComputeFailure { stage: &'static str },

    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("no candidate frequencies available for shaper '{shaper}'")]
    NoCandidateFrequencies { shaper: &'static str },

    #[error("calibration data has already been normalized")]
    AlreadyNormalized,

    #[error("cannot join normalized and raw calibration data")]
    NormalizationMismatch,

    #[error("no shaper could be selected from the fitted results")]
    NoShaperSelected,

    #[error("unknown shaper '{0}'")]
    UnknownShaper(String),

    #[error("unknown axis '{0}'")]
    UnknownAxis(String),
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
