use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use xshell::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "xtask", about = "Developer automation for the resonance workspace")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    // demo output paths are relative to the workspace root
    sh.change_dir(workspace_root()?);

    cli.command.run(&sh)
}

/// Directory holding the workspace `Cargo.toml`.
fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_holds_workspace_manifest() {
        let root = workspace_root().unwrap();
        let manifest = std::fs::read_to_string(root.join("Cargo.toml")).unwrap();
        assert!(manifest.contains("[workspace]"));
        assert!(root.join("xtask").is_dir());
    }
}
