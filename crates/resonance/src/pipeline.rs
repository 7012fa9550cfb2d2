//! End-to-end calibration: recordings in, recommended shaper out.

use crate::{config::Config, samples, worker::Worker};
use anyhow::{Context, Result, bail};
use resonance_core::{
    CalibrationData, PsdEstimator, Sample, SelectionResult, fit::fit_shaper, select::log_fit,
    select_shaper,
};
use std::{path::Path, sync::Arc};

/// Normalized PSD of all recordings and the selection made from it.
#[derive(Debug, Clone)]
pub struct Calibration {
    pub data: CalibrationData,
    pub selection: SelectionResult,
}

pub struct Pipeline {
    config: Config,
    worker: Worker,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let worker = Worker::from_config(&config.worker);
        Self { config, worker }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads every recording and calibrates against their combined PSD.
    pub async fn calibrate_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Calibration> {
        let recordings = paths
            .iter()
            .map(|path| samples::load(path))
            .collect::<Result<Vec<_>>>()?;
        self.calibrate(recordings).await
    }

    /// Estimates each recording, merges them into the first and selects a
    /// shaper for the result.
    pub async fn calibrate(&self, recordings: Vec<Vec<Sample>>) -> Result<Calibration> {
        if recordings.is_empty() {
            bail!("at least one recording is required");
        }
        let timeout = self.config.worker.timeout();

        let estimates: Vec<_> = recordings
            .into_iter()
            .enumerate()
            .map(|(idx, recording)| {
                self.worker.submit(format!("psd estimation #{idx}"), move || {
                    PsdEstimator::default().calc_freq_response(&recording)
                })
            })
            .collect();

        let mut estimates = estimates.into_iter();
        let first = estimates
            .next()
            .context("no calibration data was estimated")?;
        let mut data = first.wait(timeout).await?;
        for handle in estimates {
            let other = handle.wait(timeout).await?;
            data.join(&other)
                .context("failed to merge calibration data")?;
        }
        data.normalize()?;
        tracing::debug!(bins = data.len(), "normalized calibration data");

        let data = Arc::new(data);
        let fits: Vec<_> = self
            .config
            .fit
            .shapers
            .iter()
            .map(|&shaper| {
                let data = data.clone();
                let config = self.config.fit.clone();
                self.worker.submit(format!("fitting {shaper}"), move || {
                    fit_shaper(shaper, &data, &config)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(fits.len());
        for handle in fits {
            let fit = handle.wait(timeout).await?;
            log_fit(&fit);
            results.push(fit);
        }
        let selection = select_shaper(results)?;
        tracing::info!(
            "Recommended shaper is {} @ {:.1} Hz",
            selection.name(),
            selection.frequency
        );

        let data = Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone());
        Ok(Calibration { data, selection })
    }
}
