//! APA 7th edition citation composition.
//!
//! A citation is a deterministic function of the record: author list, year,
//! title, journal info, DOI URI. The author sub-rule carries the APA-7 edge
//! cases — the single-author form, the `& ` before the final author, and the
//! 20-author ellipsis truncation. Concatenation is reproduced exactly as
//! published: no trailing newline and no cleanup of double spaces or periods
//! that arise from the parts.

use super::*;
use crate::record::{RawAuthorEntry, RawRecord};

/// Truncation marker for papers with more than 19 authors.
const ELLIPSIS: &str = ". . . ";

/// An indexed name (`Smith J.K.`) with its internal spaces turned into APA
/// comma separators (`Smith, J.K.`).
fn apa_name(indexed: &str) -> String { indexed.replace(' ', ", ") }

/// The author portion of a citation.
///
/// `display_count` is the number of display authors, which drives the
/// final-author and truncation positions.
///
/// - one author: `Indexed, Name. `
/// - 2–20 authors: `A, One., B, Two., ... & Z, Last. `
/// - more than 19 authors: the 20th position is replaced by ` . . . ` plus
///   the last author's name, per the APA-7 truncation rule.
pub fn author_citation(entries: &[RawAuthorEntry], display_count: usize) -> Result<String> {
  let (first, last) = match (entries.first(), entries.last()) {
    (Some(first), Some(last)) => (first, last),
    _ => return Err(DepositorError::EmptyAuthorList),
  };
  if display_count < 2 {
    return Ok(format!("{}. ", apa_name(first.indexed_name()?)));
  }

  let mut authors = String::new();
  for (index, entry) in entries.iter().enumerate() {
    let position = index + 1;
    if display_count > 19 && position == 20 {
      authors.push_str(ELLIPSIS);
      authors.push_str(&apa_name(last.indexed_name()?));
      authors.push_str(". ");
      break;
    } else if position == display_count {
      authors.push_str("& ");
      authors.push_str(&apa_name(entry.indexed_name()?));
      authors.push_str(". ");
    } else {
      authors.push_str(&apa_name(entry.indexed_name()?));
      authors.push_str(", ");
    }
  }
  Ok(authors)
}

/// The journal portion of a citation.
///
/// Volume is checked first; issue absence implies nothing about volume.
/// Missing both and missing-issue-only are the two non-error branches.
pub fn journal_segment(name: &str, volume: Option<&str>, issue: Option<&str>) -> String {
  match (volume, issue) {
    (None, _) => format!("{name}. "),
    (Some(volume), None) => format!("{name}, {volume}. "),
    (Some(volume), Some(issue)) => format!("{name}, {volume}({issue}). "),
  }
}

/// Composes the full APA-7 citation for a record.
pub fn compose(record: &RawRecord, display_count: usize, doi_uri: &str) -> Result<String> {
  let mut citation = author_citation(record.raw_authors()?, display_count)?;
  citation.push_str(record.year()?);
  citation.push_str(". ");
  citation.push_str(record.title()?);
  citation.push_str(". ");
  citation.push_str(&journal_segment(record.journal_name()?, record.volume(), record.issue()));
  citation.push_str(doi_uri);
  Ok(citation)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn entries(names: &[&str]) -> Vec<RawAuthorEntry> {
    names
      .iter()
      .map(|name| serde_json::from_value(json!({ "ce:indexed-name": name })).unwrap())
      .collect()
  }

  #[test]
  fn single_author_form() {
    let entries = entries(&["Smith J."]);
    assert_eq!(author_citation(&entries, 1).unwrap(), "Smith, J.. ");
  }

  #[test]
  fn two_authors_use_ampersand() {
    let entries = entries(&["Smith J.", "Jones K."]);
    assert_eq!(author_citation(&entries, 2).unwrap(), "Smith, J., & Jones, K.. ");
  }

  #[test]
  fn twenty_five_authors_truncate_at_twenty() {
    let names: Vec<String> = (1..=25).map(|n| format!("Author{n} A.")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let entries = entries(&refs);

    let citation = author_citation(&entries, 25).unwrap();
    assert!(citation.contains("Author19, A., . . . Author25, A.. "));
    assert!(!citation.contains("Author20"));
    assert!(citation.ends_with("Author25, A.. "));
  }

  #[test]
  fn journal_segment_branches() {
    assert_eq!(journal_segment("Nature", None, None), "Nature. ");
    assert_eq!(journal_segment("Nature", Some("12"), None), "Nature, 12. ");
    assert_eq!(journal_segment("Nature", Some("12"), Some("3")), "Nature, 12(3). ");
    // Issue without volume is the volume-absent branch.
    assert_eq!(journal_segment("Nature", None, Some("3")), "Nature. ");
  }

  #[test]
  fn composes_full_citation() {
    let record: RawRecord = serde_json::from_value(json!({
      "coredata": {
        "dc:title": "Example Paper",
        "prism:publicationName": "Science",
      },
      "authors": { "author": [{ "ce:indexed-name": "Smith J." }] },
      "item": { "bibrecord": { "head": {
        "source": { "publicationdate": { "year": "2021" } },
      }}},
    }))
    .unwrap();

    assert_eq!(
      compose(&record, 1, "https://doi.org/10.1/2").unwrap(),
      "Smith, J.. 2021. Example Paper. Science. https://doi.org/10.1/2"
    );
  }
}
