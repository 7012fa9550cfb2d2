use anyhow::Result;
use clap::Args;
use resonance::{samples, synth::Synth};
use resonance_core::Axis;
use std::path::PathBuf;

#[derive(Args)]
pub struct SynthArgs {
    /// Path of the recording to write.
    pub output: PathBuf,

    /// Resonance frequency in Hz.
    #[arg(long, default_value_t = 40.0)]
    pub freq: f64,

    /// Sampling rate in Hz.
    #[arg(long, default_value_t = 1000.0)]
    pub rate: f64,

    /// Recording length in seconds.
    #[arg(long, default_value_t = 2.0)]
    pub duration: f64,

    /// Peak acceleration of the resonance.
    #[arg(long, default_value_t = 1.0)]
    pub amplitude: f64,

    /// Axis carrying the resonance (x, y, z or xy).
    #[arg(long, default_value_t = Axis::X)]
    pub axis: Axis,

    /// Peak of the uniform noise added to every axis.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Seed for the noise generator.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl SynthArgs {
    pub fn run(&self) -> Result<()> {
        let synth = Synth {
            freq: self.freq,
            rate: self.rate,
            duration: self.duration,
            amplitude: self.amplitude,
            axis: self.axis,
            noise: self.noise,
            seed: self.seed,
        };
        let recording = synth.generate()?;
        samples::save(&self.output, &recording)?;
        println!(
            "Wrote {} samples to {}",
            recording.len(),
            self.output.display()
        );
        Ok(())
    }
}
