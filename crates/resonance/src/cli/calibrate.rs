use anyhow::{Context, Result};
use clap::Args;
use resonance::{Config, Pipeline, persist};
use resonance_core::Axis;
use std::path::PathBuf;

#[derive(Args)]
pub struct CalibrateArgs {
    /// Accelerometer recordings; all are merged into the first.
    #[arg(required = true)]
    pub samples: Vec<PathBuf>,

    /// Path to the configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the calibration report.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Configuration store that receives the recommended shaper.
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Axis the recommendation is saved for (x, y, z or xy).
    #[arg(long)]
    pub axis: Option<Axis>,
}

impl CalibrateArgs {
    pub fn run(&self) -> Result<()> {
        super::init_tracing();

        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(output) = &self.output {
            config.output.report = Some(output.clone());
        }
        if let Some(save_config) = &self.save_config {
            config.output.settings = Some(save_config.clone());
        }
        if let Some(axis) = self.axis {
            config.output.axis = axis;
        }
        config.validate()?;

        calibrate(config, &self.samples)
    }
}

#[tokio::main]
async fn calibrate(config: Config, samples: &[PathBuf]) -> Result<()> {
    let pipeline = Pipeline::new(config);
    let calibration = pipeline.calibrate_files(samples).await?;
    let selection = &calibration.selection;
    let output = &pipeline.config().output;

    if let Some(report) = &output.report {
        resonance_report::save(report, &calibration.data, &selection.fits)
            .with_context(|| format!("failed to write report {}", report.display()))?;
        tracing::info!("Wrote calibration report to {}", report.display());
    }

    if let Some(settings) = &output.settings {
        persist::save_shaper(settings, output.axis, selection.shaper, selection.frequency)?;
        tracing::info!("Saved shaper settings to {}", settings.display());
    }

    println!(
        "Recommended shaper is {} @ {:.1} Hz",
        selection.name(),
        selection.frequency
    );
    Ok(())
}
