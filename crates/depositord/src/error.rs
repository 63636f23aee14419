//! Error types for the depositor CLI.

use thiserror::Error;

/// Error type alias used for the CLI crate.
pub type Result<T> = core::result::Result<T, DepositordError>;

/// Errors that can occur while running CLI commands.
#[derive(Error, Debug)]
pub enum DepositordError {
  /// An error bubbled up from the depositor library.
  #[error(transparent)]
  Depositor(#[from] depositor::error::DepositorError),

  /// An interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
