use anyhow::Result;
use clap::Args;
use xshell::{Shell, cmd};

#[derive(Args)]
pub struct Demo {
    /// Resonance frequency of the generated recording, in Hz
    #[arg(long, default_value_t = 40.0)]
    freq: f64,

    /// Peak of the noise added to the recording
    #[arg(long, default_value_t = 0.05)]
    noise: f64,

    /// Directory receiving the recording, report and settings
    #[arg(long, default_value = "target/demo")]
    out_dir: String,
}

impl Demo {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        let out_dir = &self.out_dir;
        sh.create_dir(out_dir)?;
        let recording = format!("{out_dir}/raw_data.csv");
        let report = format!("{out_dir}/calibration_data.csv");
        let settings = format!("{out_dir}/printer.toml");
        let freq = self.freq.to_string();
        let noise = self.noise.to_string();

        eprintln!("Generating recording with a {freq} Hz resonance...");
        cmd!(
            sh,
            "cargo run --quiet -p resonance -- synth {recording} --freq {freq} --noise {noise}"
        )
        .run()?;

        eprintln!("Calibrating...");
        cmd!(
            sh,
            "cargo run --quiet -p resonance -- calibrate {recording} --output {report} --save-config {settings}"
        )
        .run()?;

        eprintln!("Report written to {report}, settings to {settings}");
        Ok(())
    }
}
