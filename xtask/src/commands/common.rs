use anyhow::Result;
use clap::Args;
use xshell::{Shell, cmd};

/// Extra arguments forwarded to cargo
#[derive(Args, Default)]
pub struct CargoArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Run rustfmt check (does not modify files)
pub fn run_fmt_check(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo fmt check...");
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    Ok(())
}

/// Apply rustfmt to all files
pub fn run_fmt(sh: &Shell) -> Result<()> {
    eprintln!("Applying cargo fmt...");
    cmd!(sh, "cargo fmt --all").run()?;
    Ok(())
}

/// Run clippy with all warnings treated as errors
pub fn run_clippy(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo clippy...");
    cmd!(
        sh,
        "cargo clippy --all-features --all-targets --workspace -- -D warnings"
    )
    .run()?;
    Ok(())
}

/// Run every test in the workspace under `profile`
pub fn run_tests(sh: &Shell, profile: &str, args: &[String]) -> Result<()> {
    eprintln!("Running cargo test...");
    cmd!(sh, "cargo test --workspace --profile {profile} {args...}").run()?;
    Ok(())
}
