use anyhow::{Context, Result};
use resonance_core::{Axis, FitConfig};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

/// Main configuration for a calibration run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shaper search parameters
    #[serde(default)]
    pub fit: FitConfig,

    /// Background computation settings
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Where results are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Background computation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Upper bound for a single computation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How often a running computation is reported, in seconds
    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            progress_interval_secs: default_progress_interval_secs(),
        }
    }
}

impl WorkerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report table path
    pub report: Option<PathBuf>,

    /// Configuration store receiving the recommended shaper
    pub settings: Option<PathBuf>,

    /// Axis the recommendation is saved for
    #[serde(default = "default_axis")]
    pub axis: Axis,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: None,
            settings: None,
            axis: default_axis(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_progress_interval_secs() -> u64 {
    5
}

fn default_axis() -> Axis {
    Axis::Xy
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            // TOML is preferred, JSON is the fallback
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let fit = &self.fit;
        if fit.shapers.is_empty() {
            anyhow::bail!("fit.shapers cannot be empty");
        }
        if !(fit.max_shaper_freq.is_finite() && fit.max_shaper_freq > 0.0) {
            anyhow::bail!("fit.max_shaper_freq must be positive");
        }
        if !(fit.max_freq.is_finite() && fit.max_freq > 0.0) {
            anyhow::bail!("fit.max_freq must be positive");
        }
        if fit.max_shaper_freq > fit.max_freq {
            anyhow::bail!(
                "fit.max_shaper_freq ({}) cannot exceed fit.max_freq ({})",
                fit.max_shaper_freq,
                fit.max_freq
            );
        }
        if fit.test_damping_ratios.is_empty() {
            anyhow::bail!("fit.test_damping_ratios cannot be empty");
        }
        let ratios = std::iter::once(&fit.shaper_damping_ratio).chain(&fit.test_damping_ratios);
        for &ratio in ratios {
            if !(ratio > 0.0 && ratio < 1.0) {
                anyhow::bail!("damping ratio {ratio} must lie strictly between 0 and 1");
            }
        }

        if self.worker.timeout_secs == 0 {
            anyhow::bail!("worker.timeout_secs must be positive");
        }
        if self.worker.progress_interval_secs == 0 {
            anyhow::bail!("worker.progress_interval_secs must be positive");
        }

        Ok(())
    }
}
