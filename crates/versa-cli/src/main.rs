//! VersaTree command-line front end.
//!
//! Replays a command file against a versioned red-black tree, one command
//! per line, printing results to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Replay a command file
//! versa commands.txt
//!
//! # With engine debug logging
//! versa -v commands.txt
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Command;
use versa_common::error::VersaResult;
use versa_tree::VersaTree;

/// VersaTree command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "versa",
    version,
    about = "Replays a command file against a versioned red-black tree",
    long_about = "Reads one command per line (INC, REM, SUC, IMP) from a file and\n\
                  replays it against a versioned red-black tree, printing results\n\
                  to stdout."
)]
struct Args {
    /// Command file to replay
    file: PathBuf,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // An unreadable command file is the one fatal error; everything a
    // command itself reports is printed and the run continues.
    let content = read_commands(&args.file)
        .with_context(|| format!("couldn't read command file {}", args.file.display()))?;

    let mut map = VersaTree::new();
    for line in content.lines() {
        match Command::parse(line) {
            Ok(Some(cmd)) => println!("{}", cmd.execute(&mut map)),
            Ok(None) => {}
            Err(e) => warn!("skipping malformed line: {e}"),
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("versa_cli=debug,versa_tree=debug")
    } else {
        EnvFilter::new("versa_cli=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn read_commands(path: &Path) -> VersaResult<String> {
    Ok(std::fs::read_to_string(path)?)
}
