use anyhow::Result;
use clap::Args;
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Test {
    #[arg(long, default_value = "dev")]
    profile: String,

    #[command(flatten)]
    cargo: common::CargoArgs,
}

impl Test {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        common::run_tests(sh, &self.profile, &self.cargo.args)
    }
}
