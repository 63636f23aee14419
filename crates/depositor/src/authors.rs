//! Author resolution and institutional tagging.
//!
//! One pass over a record's raw author entries produces both outputs the
//! pipeline needs:
//!
//! - the ordered display-name list (`Surname, FirstName`, suffixed with the
//!   institution tag where an affiliation matches), and
//! - the [`NewAuthorRecord`] candidates for institutional authors, to be
//!   deduplicated against the author store by the caller.
//!
//! Deriving both from the same traversal keeps the citation-facing name and
//! the persisted record consistent.

use super::*;
use crate::record::{AffiliationRef, RawAuthorEntry};

/// One tracked institution: a display tag plus the provider affiliation ids
/// that belong to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
  /// Tag appended to member authors' display names, e.g. `TTU`.
  pub tag: String,
  /// Provider affiliation ids belonging to this institution.
  pub ids: HashSet<String>,
}

/// The two tracked institutions: the primary campus and its affiliated
/// health sciences center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionRegistry {
  /// Primary institution.
  pub primary:   Institution,
  /// Affiliated health-sciences institution.
  pub secondary: Institution,
}

/// Which tracked institution an author matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campus {
  /// Matched the primary id set.
  Primary,
  /// Matched the secondary (health sciences) id set.
  Secondary,
}

impl InstitutionRegistry {
  /// Classifies an author by their affiliation ids.
  ///
  /// Affiliations are scanned in provider order; for each, the primary set
  /// is checked before the secondary set, and the first hit wins.
  pub fn classify(&self, affiliations: &[AffiliationRef]) -> Option<Campus> {
    for affiliation in affiliations {
      if self.primary.ids.contains(&affiliation.id) {
        return Some(Campus::Primary);
      }
      if self.secondary.ids.contains(&affiliation.id) {
        return Some(Campus::Secondary);
      }
    }
    None
  }

  /// The display tag for a matched campus.
  fn tag(&self, campus: Campus) -> &str {
    match campus {
      Campus::Primary => &self.primary.tag,
      Campus::Secondary => &self.secondary.tag,
    }
  }
}

/// A newly seen institutional author, emitted for persistence.
///
/// Deduplication against the persistent author store is the caller's job;
/// the resolver only classifies and tags within one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthorRecord {
  /// The provider's stable author id.
  pub author_id:       String,
  /// Given name (or initials fallback).
  pub first_name:      String,
  /// Surname.
  pub last_name:       String,
  /// Default "last contacted" stamp: one year before the run date.
  pub last_contacted:  NaiveDate,
  /// Whether the author matched the health-sciences id set.
  pub health_sciences: bool,
}

/// Output of one author-resolution pass.
#[derive(Debug, Clone, Default)]
pub struct AuthorResolution {
  /// Display names in input order, institution-tagged where matched.
  pub display:     Vec<String>,
  /// Institutional authors only, in the same relative order.
  pub new_authors: Vec<NewAuthorRecord>,
}

/// Resolves display names and institutional candidates in a single pass.
///
/// Order is preserved: `display.len()` always equals the input length, and
/// `new_authors` keeps the relative order of the institutional subset. The
/// `today` argument pins the last-contacted default so runs are
/// reproducible under test.
///
/// # Errors
///
/// Fails for the whole record when an author has neither a given name nor
/// initials, no surname, or — for institutional authors — no stable id.
pub fn resolve_authors(
  entries: &[RawAuthorEntry],
  institutions: &InstitutionRegistry,
  today: NaiveDate,
) -> Result<AuthorResolution> {
  let mut resolution = AuthorResolution::default();
  for entry in entries {
    let first_name = entry.first_name()?;
    let surname = entry.surname()?;
    let mut display = format!("{surname}, {first_name}");

    if let Some(campus) = institutions.classify(&entry.affiliations()) {
      display.push_str(&format!(" ({})", institutions.tag(campus)));
      resolution.new_authors.push(NewAuthorRecord {
        author_id:       entry.author_id()?.to_string(),
        first_name:      first_name.to_string(),
        last_name:       surname.to_string(),
        last_contacted:  today - chrono::Duration::days(365),
        health_sciences: campus == Campus::Secondary,
      });
    }
    resolution.display.push(display);
  }
  Ok(resolution)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn registry() -> InstitutionRegistry {
    InstitutionRegistry {
      primary:   Institution {
        tag: "TTU".to_string(),
        ids: ["60032120".to_string()].into_iter().collect(),
      },
      secondary: Institution {
        tag: "TTUHSC".to_string(),
        ids: ["60024541".to_string()].into_iter().collect(),
      },
    }
  }

  fn entry(value: serde_json::Value) -> RawAuthorEntry { serde_json::from_value(value).unwrap() }

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2023, 3, 27).unwrap() }

  #[test]
  fn preserves_order_and_length() {
    let entries = vec![
      entry(json!({ "preferred-name": { "ce:given-name": "Ada", "ce:surname": "Lovelace" } })),
      entry(json!({ "preferred-name": { "ce:given-name": "Alan", "ce:surname": "Turing" } })),
    ];

    let resolution = resolve_authors(&entries, &registry(), today()).unwrap();
    assert_eq!(resolution.display, vec!["Lovelace, Ada", "Turing, Alan"]);
    assert!(resolution.new_authors.is_empty());
  }

  #[test]
  fn tags_primary_and_emits_record() {
    let entries = vec![entry(json!({
      "@auid": "7004212771",
      "preferred-name": { "ce:given-name": "Ada", "ce:surname": "Lovelace" },
      "affiliation": { "@id": "60032120" },
    }))];

    let resolution = resolve_authors(&entries, &registry(), today()).unwrap();
    assert_eq!(resolution.display, vec!["Lovelace, Ada (TTU)"]);
    assert_eq!(resolution.new_authors, vec![NewAuthorRecord {
      author_id:       "7004212771".to_string(),
      first_name:      "Ada".to_string(),
      last_name:       "Lovelace".to_string(),
      last_contacted:  NaiveDate::from_ymd_opt(2022, 3, 27).unwrap(),
      health_sciences: false,
    }]);
  }

  #[test]
  fn first_matching_affiliation_wins() {
    // Secondary id appears first in provider order, so the author is tagged
    // as health sciences even though a primary id follows.
    let entries = vec![entry(json!({
      "@auid": "1",
      "preferred-name": { "ce:given-name": "Ada", "ce:surname": "Lovelace" },
      "affiliation": [{ "@id": "60024541" }, { "@id": "60032120" }],
    }))];

    let resolution = resolve_authors(&entries, &registry(), today()).unwrap();
    assert_eq!(resolution.display, vec!["Lovelace, Ada (TTUHSC)"]);
    assert!(resolution.new_authors[0].health_sciences);
  }

  #[test]
  fn unaffiliated_author_is_untagged() {
    let entries = vec![entry(json!({
      "preferred-name": { "ce:given-name": "Grace", "ce:surname": "Hopper" },
      "affiliation": { "@id": "99999999" },
    }))];

    let resolution = resolve_authors(&entries, &registry(), today()).unwrap();
    assert_eq!(resolution.display, vec!["Hopper, Grace"]);
    assert!(resolution.new_authors.is_empty());
  }

  #[test]
  fn missing_name_parts_fail_the_record() {
    let entries = vec![entry(json!({ "preferred-name": { "ce:surname": "Nameless" } }))];
    assert!(matches!(
      resolve_authors(&entries, &registry(), today()),
      Err(DepositorError::MissingRequiredField("ce:given-name/ce:initials"))
    ));
  }
}
