#![allow(clippy::missing_docs_in_private_items)]

//! SQLite persistence for authors, publications, and run metrics.
//!
//! The store backs three concerns the pipeline tracks across runs: which
//! institutional authors have been seen (insert-if-new, so the resolver's
//! candidates can be replayed safely), which publications were deposited and
//! by whom, and the per-run metrics row. All access goes through
//! [`tokio_rusqlite`] so the async driver never blocks on disk.

use rusqlite::params;
use tokio_rusqlite::Connection;

use super::*;
use crate::authors::NewAuthorRecord;

/// One deposited publication, keyed by its repository handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRow {
  /// Repository handle.
  pub handle:         String,
  /// Paper title.
  pub title:          String,
  /// Bare DOI.
  pub doi:            String,
  /// Publication year.
  pub year_issued:    i64,
  /// Date the item became available in the repository.
  pub date_available: NaiveDate,
}

/// Metrics for one batch run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
  /// DOIs that survived normalization and duplicate filtering.
  pub valid_dois:     u32,
  /// Items successfully deposited.
  pub uploaded_items: u32,
  /// Whether any per-DOI or deposit error occurred during the run.
  pub error:          bool,
  /// Run date.
  pub date_ran:       NaiveDate,
  /// Wall-clock run time in seconds.
  pub run_time_secs:  f64,
}

/// Async handle to the relational store.
pub struct Store {
  conn: Connection,
}

impl Store {
  /// Opens (creating if needed) the store at `path` and applies the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path.as_ref().to_path_buf()).await?;
    conn
      .call(|conn| {
        conn.execute_batch(include_str!(concat!(
          env!("CARGO_MANIFEST_DIR"),
          "/migrations/init.sql"
        )))?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  /// Default store location under the platform data directory.
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("depositor").join("depositor.db")
  }

  /// Whether an author id is already tracked.
  pub async fn known_author(&self, author_id: &str) -> Result<bool> {
    let author_id = author_id.to_string();
    Ok(
      self
        .conn
        .call(move |conn| {
          let mut statement = conn.prepare("SELECT 1 FROM authors WHERE author_id = ?1")?;
          Ok(statement.exists([&author_id])?)
        })
        .await?,
    )
  }

  /// Inserts the authors that are not yet tracked; returns how many were
  /// actually new. New authors start with zero papers, no email, and the
  /// faculty default.
  pub async fn add_new_authors(&self, authors: Vec<NewAuthorRecord>) -> Result<usize> {
    Ok(
      self
        .conn
        .call(move |conn| {
          let tx = conn.transaction()?;
          let mut inserted = 0;
          for author in &authors {
            inserted += tx.execute(
              "INSERT OR IGNORE INTO authors
                 (author_id, first_name, last_name, last_contacted, health_sciences)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              params![
                author.author_id,
                author.first_name,
                author.last_name,
                author.last_contacted,
                author.health_sciences
              ],
            )?;
          }
          tx.commit()?;
          Ok(inserted)
        })
        .await?,
    )
  }

  /// Records one deposited publication.
  pub async fn record_publication(&self, publication: PublicationRow) -> Result<()> {
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO publications (handle, title, doi, year_issued, date_available)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
              publication.handle,
              publication.title,
              publication.doi,
              publication.year_issued,
              publication.date_available
            ],
          )?;
          Ok(())
        })
        .await?,
    )
  }

  /// Links a publication to its institutional authors and bumps each
  /// author's paper count.
  pub async fn link_authors(&self, handle: &str, author_ids: Vec<String>) -> Result<()> {
    let handle = handle.to_string();
    Ok(
      self
        .conn
        .call(move |conn| {
          let tx = conn.transaction()?;
          for author_id in &author_ids {
            tx.execute(
              "UPDATE authors SET num_papers = num_papers + 1 WHERE author_id = ?1",
              [author_id],
            )?;
            tx.execute(
              "INSERT OR IGNORE INTO author_publications (author_id, pub_handle) VALUES (?1, ?2)",
              params![author_id, handle],
            )?;
          }
          tx.commit()?;
          Ok(())
        })
        .await?,
    )
  }

  /// Records the metrics row for one run.
  ///
  /// A run that identified no valid DOIs records nothing.
  pub async fn record_run(&self, metrics: RunMetrics) -> Result<()> {
    if metrics.valid_dois == 0 {
      return Ok(());
    }
    Ok(
      self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO run_metrics (valid_dois, uploaded_items, error, date_ran, run_time_secs)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
              metrics.valid_dois,
              metrics.uploaded_items,
              metrics.error,
              metrics.date_ran,
              metrics.run_time_secs
            ],
          )?;
          Ok(())
        })
        .await?,
    )
  }

  /// Number of runs with a recorded metrics row.
  pub async fn runs_recorded(&self) -> Result<i64> {
    Ok(
      self
        .conn
        .call(|conn| {
          Ok(conn.query_row("SELECT COUNT(*) FROM run_metrics", [], |row| row.get(0))?)
        })
        .await?,
    )
  }
}
