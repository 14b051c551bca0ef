//! weft-setup: scaffold a project for the Rolling Weft hooks, or check one.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "weft-setup", version, about = "Set up or check a Rolling Weft project")]
struct Cli {
    /// Verify environment health instead of running setup
    #[arg(long)]
    check: bool,

    /// Directory holding the built hook binaries (defaults to this executable's directory)
    #[arg(long, value_name = "DIR")]
    hooks_dir: Option<PathBuf>,

    /// Target project path
    target: Option<PathBuf>,
}

const USAGE: &str = "\
ERROR: Target project path is required.

Usage:
  weft-setup <path-to-project>
  weft-setup --check [path-to-project]

Example:
  weft-setup ~/projects/my-app
  weft-setup --check ~/projects/my-app";

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.check {
        let root = match cli.target {
            Some(target) => absolute(&target),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        return if weft_setup::check::run(&root) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let Some(target) = cli.target else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let hooks_dir = cli.hooks_dir.unwrap_or_else(default_hooks_dir);
    match weft_setup::run_setup(&absolute(&target), &hooks_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Hook binaries are built next to this one.
fn default_hooks_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
