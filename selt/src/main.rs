//! Selt CLI - read and check Sel source files.
//!
//! This is the entry point for the selt command-line tool. It uses clap
//! for argument parsing and dispatches to the command handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::check::{run_check, CheckArgs};
use commands::read::{run_read, ReadArgs};
use config::Config;
use error::{Result, SeltError};

/// Selt - read and check Sel source files
#[derive(Parser, Debug)]
#[command(name = "selt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for reading Sel source", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "SELT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SELT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "SELT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the selt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read forms and print them canonically
    ///
    /// Reads every form from the given file (or stdin) and prints each
    /// one in its canonical textual representation.
    Read(ReadCommand),

    /// Check that files read cleanly
    ///
    /// Parses each file and reports per-file results; exits nonzero if
    /// any file fails to read.
    Check(CheckCommand),
}

/// Arguments for the read subcommand.
#[derive(Parser, Debug)]
struct ReadCommand {
    /// Input file (default: stdin)
    file: Option<PathBuf>,

    /// Namespace for ::keyword and syntax-quote resolution
    #[arg(short, long)]
    namespace: Option<String>,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// Main entry point for the selt CLI.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;
    execute_command(cli.command, cli.verbose, config)?;
    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| SeltError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Read(args) => run_read(
            ReadArgs {
                verbose,
                file: args.file,
                namespace: args.namespace,
            },
            config,
        ),
        Commands::Check(args) => run_check(CheckArgs {
            verbose,
            files: args.files,
        }),
    }
}
