//! git2ftp CLI
//!
//! Transfers the files changed between two git commits to an FTP server.

mod cli;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::Result;
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return Ok(());
        }
    };

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: cannot set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let settings = Settings::resolve(&cli)?;
    commands::run_sync(&settings)
}
