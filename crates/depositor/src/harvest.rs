//! The sequential batch driver and its capability traits.
//!
//! The harvester owns no transport of its own: the bibliographic provider
//! and the open-access lookup are capability traits, implemented over HTTP
//! in [`source`](crate::source) and by in-memory fakes in tests.
//!
//! Processing is strictly sequential — one DOI is fully resolved before the
//! next begins — and failure is per-DOI: a lookup miss or a classified
//! extraction error becomes an [`UnresolvedDoi`] entry in the report, never
//! an aborted batch.

use super::*;
use crate::{
  authors::InstitutionRegistry,
  normalize::{normalize, HarvestedPaper},
  record::RawRecord,
};

/// Bibliographic search/detail capability.
#[async_trait]
pub trait BibliographicSource: Send + Sync {
  /// Resolves a DOI to the provider's stable record id; `None` when the DOI
  /// is unknown to the provider.
  async fn search(&self, doi: &str) -> Result<Option<String>>;

  /// Fetches the full detail record for a stable id.
  ///
  /// Fails with [`DepositorError::NotFound`] when the id has gone stale.
  async fn detail(&self, id: &str) -> Result<RawRecord>;
}

/// Open-access license lookup capability.
#[async_trait]
pub trait OpenAccessSource: Send + Sync {
  /// License code of the best open-access copy, or `None` when no OA copy
  /// is indexed for this DOI.
  async fn license(&self, doi: &str) -> Result<Option<String>>;
}

/// A DOI that produced no paper, with the classified reason.
#[derive(Debug)]
pub struct UnresolvedDoi {
  /// The bare DOI.
  pub doi:    String,
  /// Why it failed.
  pub reason: DepositorError,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct HarvestReport {
  /// Successfully normalized papers, in input order.
  pub papers:     Vec<HarvestedPaper>,
  /// DOIs that failed, in input order. Never mixed into `papers`.
  pub unresolved: Vec<UnresolvedDoi>,
}

impl HarvestReport {
  /// Number of DOIs that produced a paper.
  pub fn succeeded(&self) -> usize { self.papers.len() }

  /// Number of DOIs that did not.
  pub fn failed(&self) -> usize { self.unresolved.len() }
}

/// Drives search → detail → open-access lookup → normalize for a batch.
pub struct Harvester<B, O> {
  /// Bibliographic provider.
  bibliographic: B,
  /// Open-access lookup.
  open_access:   O,
  /// Tracked institution id sets.
  institutions:  InstitutionRegistry,
  /// Run date, injected so the last-contacted default is reproducible.
  today:         NaiveDate,
}

impl<B: BibliographicSource, O: OpenAccessSource> Harvester<B, O> {
  /// Creates a harvester over the given capabilities.
  pub fn new(
    bibliographic: B,
    open_access: O,
    institutions: InstitutionRegistry,
    today: NaiveDate,
  ) -> Self {
    Self { bibliographic, open_access, institutions, today }
  }

  /// Processes a batch of bare DOIs sequentially.
  ///
  /// Every input DOI ends up in exactly one of the report's two lists; a
  /// single paper's failure never aborts the batch.
  pub async fn run(&self, dois: &[String]) -> HarvestReport {
    let mut report = HarvestReport::default();
    for doi in dois {
      match self.harvest_one(doi).await {
        Ok(paper) => report.papers.push(paper),
        Err(reason) => {
          warn!("couldn't harvest {doi}: {reason}");
          report.unresolved.push(UnresolvedDoi { doi: doi.clone(), reason });
        },
      }
    }
    report
  }

  /// Fully resolves one DOI.
  async fn harvest_one(&self, doi: &str) -> Result<HarvestedPaper> {
    let id = self.bibliographic.search(doi).await?.ok_or(DepositorError::LookupMiss)?;
    debug!("resolved {doi} to record id {id}");
    let record = self.bibliographic.detail(&id).await?;
    let oa_license = self.open_access.license(doi).await?;
    normalize(doi, &record, oa_license.as_deref(), &self.institutions, self.today)
  }
}
