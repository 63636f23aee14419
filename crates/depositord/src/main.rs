//! Command line interface for the depositor harvesting pipeline.
//!
//! This crate provides the `depositor` binary on top of the [`depositor`]
//! library:
//!
//! ```bash
//! # Write the configuration template
//! depositor init
//!
//! # Harvest a batch of DOIs and deposit them into the repository
//! depositor run dois.txt
//!
//! # Inspect what would be deposited without touching anything
//! depositor run --dry-run dois.txt
//! ```
//!
//! The `run` command prompts for repository credentials, checks the batch
//! for items already in the target collection, harvests the remaining DOIs
//! sequentially, deposits each normalized record, persists new institutional
//! authors / publications / run metrics, and prints a summary of succeeded
//! versus unresolved DOIs.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use depositor::config::Config;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Harvest DOI metadata and deposit it into an institutional \
                                    repository")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The effective configuration file path.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_file(true).with_line_number(true).init();
}

/// Entry point for the depositor CLI application
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match cli.command.clone() {
    Commands::Init { force } => init(&cli, force).await,
    Commands::Run { dois, dry_run } => run(&cli, dois, dry_run).await,
  }
}
