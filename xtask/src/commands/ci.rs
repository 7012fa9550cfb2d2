use anyhow::Result;
use clap::{Args, Subcommand};
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Ci {
    #[command(subcommand)]
    command: Option<CiCommand>,
}

#[derive(Subcommand)]
pub enum CiCommand {
    /// Check formatting without modifying files
    Fmt,
    /// Run cargo clippy with warnings denied
    Clippy,
    /// Run the workspace tests
    Test(common::CargoArgs),
}

impl Ci {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match &self.command {
            Some(cmd) => cmd.run(sh),
            None => {
                CiCommand::Fmt.run(sh)?;
                CiCommand::Clippy.run(sh)?;
                CiCommand::Test(common::CargoArgs::default()).run(sh)?;
                eprintln!("CI checks passed!");
                Ok(())
            }
        }
    }
}

impl CiCommand {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match self {
            CiCommand::Fmt => common::run_fmt_check(sh),
            CiCommand::Clippy => common::run_clippy(sh),
            CiCommand::Test(args) => common::run_tests(sh, "dev", &args.args),
        }
    }
}
