//! CLI subcommands.

use super::*;

pub mod init;
pub mod run;

pub use init::init;
pub use run::run;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write the configuration template
  Init {
    /// Overwrite an existing configuration file without asking
    #[arg(long)]
    force: bool,
  },

  /// Harvest a batch of DOIs and deposit them into the repository
  Run {
    /// Text file with one DOI (or doi.org URL) per line
    dois: PathBuf,

    /// Harvest and report only; skip login, deposit, and persistence
    #[arg(long)]
    dry_run: bool,
  },
}
