//! fsh entry point.
//!
//! Resolves the working directory, then runs the interactive shell on
//! stdin/stdout until `exit` or end of input.
//!
//! Usage: `fsh [--dir <path> | <path>]`. Without an argument the directory
//! comes from `FSH_CURRENT_DIRECTORY`, the config file, or the process
//! directory, in that order.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use fsh_platform::DesktopLauncher;
use fsh_terminal::{FileOps, Shell};
use fsh_types::config::FshConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let dir_arg = directory_argument(std::env::args().skip(1));
    let config = FshConfig::discover()?.with_directory(dir_arg);
    let working_dir = config.working_directory()?;
    log::info!("Working directory: {}", working_dir.display());

    let shell = Shell::new(FileOps::new(working_dir, Box::new(DesktopLauncher::new())));
    shell
        .run(io::stdin().lock(), io::stdout().lock())
        .context("console I/O failed")?;
    Ok(())
}

/// `--dir <path>`, `-d <path>`, or a bare `<path>`.
fn directory_argument(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    match args.next()? {
        flag if flag == "--dir" || flag == "-d" => args.next().map(PathBuf::from),
        path => Some(PathBuf::from(path)),
    }
}
