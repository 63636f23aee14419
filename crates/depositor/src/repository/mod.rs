//! Institutional repository deposit.
//!
//! The repository consumes flat Dublin Core key/value metadata; the mapping
//! from a [`NormalizedPaper`] lives here so both the real client and test
//! fakes publish identical records. Keywords are cardinality-sensitive: a
//! paper whose record carried no keywords field contributes no `dc.subject`
//! entries at all.

use super::*;
use crate::normalize::NormalizedPaper;

mod dspace;

pub use dspace::DSpaceRepository;

/// Dublin Core key for the paper title.
const TITLE: &str = "dc.title";
/// Dublin Core key for one author display name.
const AUTHORS: &str = "dc.creator";
/// Dublin Core key for the publication year.
const YEAR: &str = "dc.date.issued";
/// Dublin Core key for the DOI URI.
const DOI: &str = "dc.identifier.uri";
/// Dublin Core key for one keyword.
const KEYWORDS: &str = "dc.subject";
/// Dublin Core key for the license line.
const LICENSE: &str = "dc.description";
/// Dublin Core key for the abstract.
const ABSTRACT: &str = "dc.description.abstract";
/// Dublin Core key for the language code.
const LANGUAGE: &str = "dc.language.iso";
/// Dublin Core key for the document type.
const TYPE: &str = "dc.type";
/// Dublin Core key for the composed citation.
const CITATION: &str = "dc.identifier.citation";

/// One metadata entry in the repository's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
  /// Dublin Core key.
  pub key:   String,
  /// Field value.
  pub value: String,
}

impl MetadataEntry {
  /// Builds one entry.
  fn new(key: &str, value: impl Into<String>) -> Self {
    Self { key: key.to_string(), value: value.into() }
  }
}

/// Receipt for one deposited item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepositReceipt {
  /// Repository item UUID.
  #[serde(rename = "UUID")]
  pub uuid:   String,
  /// Persistent handle assigned to the item.
  pub handle: String,
}

/// Maps a normalized paper onto the repository's Dublin Core entries.
///
/// Multi-valued fields (authors, keywords) contribute one entry per value,
/// in order.
pub fn metadata_entries(paper: &NormalizedPaper) -> Vec<MetadataEntry> {
  let mut entries = vec![MetadataEntry::new(TITLE, &paper.title)];
  for author in &paper.display_authors {
    entries.push(MetadataEntry::new(AUTHORS, author));
  }
  entries.push(MetadataEntry::new(YEAR, &paper.year));
  entries.push(MetadataEntry::new(DOI, &paper.doi_uri));
  if let Some(keywords) = &paper.keywords {
    for keyword in keywords {
      entries.push(MetadataEntry::new(KEYWORDS, keyword));
    }
  }
  entries.push(MetadataEntry::new(LICENSE, &paper.license));
  entries.push(MetadataEntry::new(ABSTRACT, &paper.abstract_text));
  entries.push(MetadataEntry::new(LANGUAGE, &paper.language));
  entries.push(MetadataEntry::new(TYPE, &paper.document_type));
  entries.push(MetadataEntry::new(CITATION, &paper.citation));
  entries
}

/// Repository capability: session login, duplicate probe, item deposit.
#[async_trait]
pub trait Repository: Send + Sync {
  /// Authenticates and stores the session for subsequent calls.
  async fn login(&mut self, email: &str, password: &str) -> Result<()>;

  /// Whether an item with this DOI URI already exists in the target
  /// collection.
  async fn is_duplicate(&self, doi_uri: &str) -> Result<bool>;

  /// Deposits one paper as a new item in the target collection.
  async fn deposit(&self, paper: &NormalizedPaper) -> Result<DepositReceipt>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paper(keywords: Option<Vec<String>>) -> NormalizedPaper {
    NormalizedPaper {
      title: "Example Paper".to_string(),
      display_authors: vec!["Smith, J. (TTU)".to_string(), "Jones, K.".to_string()],
      year: "2021".to_string(),
      doi_uri: "https://doi.org/10.1/2".to_string(),
      keywords,
      license: "© 2021 The Authors. cc-by".to_string(),
      abstract_text: "Body.".to_string(),
      language: "eng".to_string(),
      document_type: "Article".to_string(),
      citation: "Smith, J., & Jones, K.. 2021. Example Paper. Science. https://doi.org/10.1/2"
        .to_string(),
    }
  }

  #[test]
  fn one_entry_per_author_and_keyword() {
    let paper = paper(Some(vec!["etl".to_string(), "metadata".to_string()]));
    let entries = metadata_entries(&paper);

    let creators: Vec<&str> =
      entries.iter().filter(|e| e.key == AUTHORS).map(|e| e.value.as_str()).collect();
    let subjects: Vec<&str> =
      entries.iter().filter(|e| e.key == KEYWORDS).map(|e| e.value.as_str()).collect();

    assert_eq!(creators, vec!["Smith, J. (TTU)", "Jones, K."]);
    assert_eq!(subjects, vec!["etl", "metadata"]);
  }

  #[test]
  fn absent_keywords_contribute_no_subject_entries() {
    let entries = metadata_entries(&paper(None));
    assert!(entries.iter().all(|entry| entry.key != KEYWORDS));
  }

  #[test]
  fn receipt_parses_from_xml() {
    let xml = r#"<item>
      <UUID>0a1b2c3d</UUID>
      <name>Example Paper</name>
      <handle>2346/91011</handle>
    </item>"#;
    let receipt: DepositReceipt = quick_xml::de::from_str(xml).unwrap();
    assert_eq!(receipt, DepositReceipt {
      uuid:   "0a1b2c3d".to_string(),
      handle: "2346/91011".to_string(),
    });
  }
}
