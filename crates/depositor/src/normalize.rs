//! Per-paper metadata assembly.
//!
//! [`normalize`] is the all-or-nothing step that turns one raw detail record
//! into a [`NormalizedPaper`] plus its side outputs. It is deterministic:
//! identical inputs (including the injected run date) produce byte-identical
//! output, so the harvest driver can treat it as a pure function.

use super::*;
use crate::{
  authors::{resolve_authors, InstitutionRegistry, NewAuthorRecord},
  citation, doi, extract,
  record::RawRecord,
};

/// Repository-ready metadata for one paper.
///
/// Constructed once per successfully resolved DOI and immutable thereafter;
/// consumed by the repository deposit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPaper {
  /// Paper title.
  pub title:           String,
  /// Ordered display authors, institution-tagged where matched.
  pub display_authors: Vec<String>,
  /// Publication year, as the provider's string.
  pub year:            String,
  /// Canonical `https://doi.org/...` URI.
  pub doi_uri:         String,
  /// Author keywords; `None` when the record carried no keywords field.
  pub keywords:        Option<Vec<String>>,
  /// Harvested license merged with the open-access license code. May carry
  /// a trailing space; that is the published form.
  pub license:         String,
  /// Abstract text with the license boilerplate removed; empty when absent.
  pub abstract_text:   String,
  /// ISO language code.
  pub language:        String,
  /// Human-readable document type.
  pub document_type:   String,
  /// Fully composed APA-7 citation.
  pub citation:        String,
}

/// A successfully normalized paper plus its side outputs.
#[derive(Debug, Clone)]
pub struct HarvestedPaper {
  /// The bare DOI this paper was resolved from.
  pub doi:         String,
  /// The normalized metadata.
  pub paper:       NormalizedPaper,
  /// Institutional-author candidates, in author order. Deduplication
  /// against the author store is the caller's job.
  pub new_authors: Vec<NewAuthorRecord>,
}

impl HarvestedPaper {
  /// Stable ids of this paper's institutional authors, in author order.
  pub fn institutional_ids(&self) -> Vec<String> {
    self.new_authors.iter().map(|author| author.author_id.clone()).collect()
  }
}

/// Normalizes one raw record into a [`HarvestedPaper`].
///
/// The display-author list and the emitted [`NewAuthorRecord`]s come from
/// one traversal of the raw author entries, so institutional tagging stays
/// consistent between the citation-facing names and the persisted records.
///
/// # Errors
///
/// Fails with the per-DOI classification of [`DepositorError`] — a missing
/// required field, a malformed keywords structure, or an empty author list.
/// No partial paper is ever returned; a failed DOI is all-or-nothing.
pub fn normalize(
  doi: &str,
  record: &RawRecord,
  oa_license: Option<&str>,
  institutions: &InstitutionRegistry,
  today: NaiveDate,
) -> Result<HarvestedPaper> {
  let resolution = resolve_authors(record.raw_authors()?, institutions, today)?;

  let harvested = extract::harvested_license(record);
  let license = extract::merge_license(&harvested, oa_license);
  let abstract_text = extract::strip_license(record.abstract_text(), &harvested);

  let doi_uri = doi::canonical_uri(doi);
  let citation = citation::compose(record, resolution.display.len(), &doi_uri)?;

  Ok(HarvestedPaper {
    doi: doi.to_string(),
    paper: NormalizedPaper {
      title: record.title()?.to_string(),
      display_authors: resolution.display,
      year: record.year()?.to_string(),
      doi_uri,
      keywords: extract::keywords(record)?,
      license,
      abstract_text,
      language: record.language()?.to_string(),
      document_type: record.document_type()?.to_string(),
      citation,
    },
    new_authors: resolution.new_authors,
  })
}
