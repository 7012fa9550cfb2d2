//! Host side of resonance calibration: configuration, recordings,
//! background workers and the end-to-end pipeline.

pub mod config;
pub mod persist;
pub mod pipeline;
pub mod samples;
pub mod synth;
pub mod worker;

pub use config::Config;
pub use pipeline::{Calibration, Pipeline};
pub use worker::{TaskHandle, Worker};
