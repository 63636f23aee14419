//! DOI metadata harvesting and institutional repository deposit.
//!
//! `depositor` ingests a batch of DOIs, enriches each one through a
//! bibliographic search/detail provider and an open-access lookup, and turns
//! the heterogeneous, partially-missing responses into repository-ready
//! records:
//!
//! - a structured, ordered author list with institutional-affiliation tags,
//! - an APA 7th edition citation string (including the 20-author truncation
//!   rule),
//! - a license/abstract reconciliation that strips copyright boilerplate and
//!   merges in the open-access license code.
//!
//! Normalized records are deposited into a DSpace-style repository, and new
//! institutional authors, publications, and per-run metrics are tracked in a
//! local SQLite store.
//!
//! # Pipeline
//!
//! Processing is strictly sequential: each DOI is fully resolved (search →
//! detail → open-access lookup → normalize) before the next begins. A DOI the
//! provider does not know, or whose record is missing a required field, is
//! recorded as unresolved and the batch continues — one bad DOI never aborts
//! a run.
//!
//! ```no_run
//! use chrono::Utc;
//! use depositor::{
//!   config::Config,
//!   harvest::Harvester,
//!   source::{ScopusSource, UnpaywallSource},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_path(Config::default_path())?;
//! let harvester = Harvester::new(
//!   ScopusSource::new(&config.provider)?,
//!   UnpaywallSource::new(&config.open_access)?,
//!   config.institutions.clone(),
//!   Utc::now().date_naive(),
//! );
//!
//! let report = harvester.run(&["10.1145/1327452.1327492".into()]).await;
//! println!("succeeded: {}, unresolved: {}", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`doi`]: free-text DOI normalization and the canonical URI form
//! - [`record`]: typed model of the raw bibliographic detail response
//! - [`authors`]: author resolution and institutional tagging
//! - [`extract`]: keyword, license, and abstract extraction
//! - [`citation`]: APA-7 citation composition
//! - [`normalize`]: per-paper metadata assembly
//! - [`harvest`]: the sequential batch driver and its capability traits
//! - [`source`]: HTTP provider clients (bibliographic search/detail, open
//!   access)
//! - [`repository`]: institutional repository deposit
//! - [`store`]: SQLite persistence for authors, publications, and metrics
//! - [`config`]: TOML runtime configuration

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

pub mod authors;
pub mod citation;
pub mod config;
pub mod doi;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod normalize;
pub mod record;
pub mod repository;
pub mod source;
pub mod store;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use depositor::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    error::{DepositorError, Result},
    harvest::{BibliographicSource, OpenAccessSource},
    repository::Repository,
  };
}
