//! Error types for the depositor library.
//!
//! One enum covers every failure mode in the pipeline. The first group of
//! variants is the per-DOI classification the harvest driver folds into its
//! unresolved list; the rest wrap transport and storage errors from the
//! crates underneath.

use thiserror::Error;

/// Error type alias used throughout the [`depositor`](crate) crate.
pub type Result<T> = core::result::Result<T, DepositorError>;

/// Errors that can occur while harvesting, depositing, or persisting papers.
#[derive(Error, Debug)]
pub enum DepositorError {
  /// The bibliographic provider has no entry for this DOI.
  ///
  /// This is an expected outcome, not an exceptional one: the driver records
  /// the DOI as unresolved and moves on.
  #[error("DOI is not indexed by the bibliographic provider")]
  LookupMiss,

  /// A detail record could not be fetched for a previously returned stable
  /// id (the id went stale between search and detail).
  #[error("record not found")]
  NotFound,

  /// A required field was absent from the detail record.
  ///
  /// Title, authors, year, and journal name are assumed present once a
  /// lookup succeeded; a record without one of them is terminal for that
  /// DOI. The field name uses the provider's spelling.
  #[error("record is missing required field `{0}`")]
  MissingRequiredField(&'static str),

  /// The author-keywords substructure existed but had an unexpected shape.
  #[error("author-keywords field has an unexpected shape")]
  MalformedKeywords,

  /// An author's affiliation field had an unexpected shape.
  ///
  /// The author resolver recovers this case by treating the author as
  /// unaffiliated, so it does not currently surface from [`normalize`](crate::normalize::normalize).
  #[error("affiliation field has an unexpected shape")]
  MalformedAffiliation,

  /// The record lists no authors, so no citation can be composed.
  #[error("record lists no authors")]
  EmptyAuthorList,

  /// A network request failed.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A JSON response could not be parsed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// An XML deposit receipt could not be parsed.
  #[error(transparent)]
  Xml(#[from] quick_xml::DeError),

  /// A SQLite operation failed.
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// An async SQLite operation failed.
  #[error(transparent)]
  AsyncSqlite(#[from] tokio_rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A TOML configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The repository rejected a request (login, probe, or deposit).
  #[error("repository error: {0}")]
  Repository(String),

  /// The runtime configuration is missing or unusable.
  #[error("{0}")]
  Config(String),
}
