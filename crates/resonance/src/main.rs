use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Calibrate(args) => args.run(),
        Command::Synth(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "resonance", about = "Input shaper calibration from accelerometer data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate resonances from recordings and recommend an input shaper.
    Calibrate(cli::calibrate::CalibrateArgs),
    /// Generate a synthetic recording with a single resonance.
    Synth(cli::synth::SynthArgs),
}
