//! Keyword, license, and abstract extraction.
//!
//! These fields are all optional on the provider side, and two of them carry
//! shape quirks (keywords and copyright may arrive as an object or a list).
//! The extractors here resolve the quirks and apply the reconciliation rules:
//! abstracts sometimes embed the publisher copyright line verbatim, so the
//! harvested license string is removed from the abstract, and the open-access
//! license code is merged into the license field.

use super::*;
use crate::record::{CopyrightField, OneOrMany, RawRecord, TextValue};

/// Author keywords, in order — or `None` when the record carries no
/// author-keywords substructure at all.
///
/// Callers distinguish "no keywords field" from "empty keywords", so absence
/// is an explicit marker, never an empty list.
///
/// # Errors
///
/// Fails with [`DepositorError::MalformedKeywords`] when the substructure
/// exists but its `author-keyword` entries are neither a text node nor a
/// list of text nodes.
pub fn keywords(record: &RawRecord) -> Result<Option<Vec<String>>> {
  let Some(value) = &record.item.bibrecord.head.citation_info.author_keywords else {
    return Ok(None);
  };
  let entries = match value {
    Value::Object(map) => match map.get("author-keyword") {
      Some(entries) => entries,
      // The wrapper exists but holds no keyword entries; same as absent.
      None => return Ok(None),
    },
    _ => return Err(DepositorError::MalformedKeywords),
  };
  let entries: OneOrMany<TextValue> =
    serde_json::from_value(entries.clone()).map_err(|_| DepositorError::MalformedKeywords)?;
  Ok(Some(entries.iter().map(|keyword| keyword.value.clone()).collect()))
}

/// The harvested publisher copyright line, or the empty string.
///
/// The list form resolves to its first entry's text.
pub fn harvested_license(record: &RawRecord) -> String {
  match &record.coredata.publisher_copyright {
    None => String::new(),
    Some(CopyrightField::Text(text)) => text.clone(),
    Some(CopyrightField::Entries(entries)) =>
      entries.first().map(|entry| entry.value.clone()).unwrap_or_default(),
  }
}

/// Merges the harvested license with the open-access license code.
///
/// The OA code is appended after a single space even when absent — the
/// trailing space is part of the published form and downstream systems key
/// on it, so it is reproduced exactly.
pub fn merge_license(harvested: &str, oa_license: Option<&str>) -> String {
  format!("{harvested} {}", oa_license.unwrap_or_default())
}

/// Abstract text with the copyright boilerplate removed.
///
/// Removes the first literal occurrence of the harvested license string; a
/// null or absent abstract becomes the empty string.
pub fn strip_license(abstract_text: Option<&str>, license: &str) -> String {
  match abstract_text {
    None => String::new(),
    Some(text) if license.is_empty() => text.to_string(),
    Some(text) => text.replacen(license, "", 1),
  }
}
