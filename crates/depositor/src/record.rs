//! Typed model of a raw bibliographic detail record.
//!
//! The bibliographic provider's detail response is deeply nested and
//! inconsistently shaped: several fields arrive either as a single object or
//! as a list, depending on cardinality. This module models the response
//! faithfully — field names keep the provider's spelling — and funnels every
//! read through accessor methods so the rest of the pipeline never touches
//! the raw tree.
//!
//! Accessor contracts:
//!
//! - required fields (title, year, journal name, language, document type,
//!   authors) fail with [`DepositorError::MissingRequiredField`] or
//!   [`DepositorError::EmptyAuthorList`] when absent;
//! - object-or-list fields are normalized once, at this boundary, through
//!   [`OneOrMany`];
//! - an affiliation field with an unrecognized shape is recovered as "no
//!   affiliations" and never surfaces as an error.

use super::*;

/// A field a provider may serialize either as a single bare object or as a
/// list of objects, depending on cardinality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
  /// The field held a single bare object.
  One(T),
  /// The field held a list of objects.
  Many(Vec<T>),
}

impl<T> OneOrMany<T> {
  /// Iterates the contained values in provider order.
  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    match self {
      OneOrMany::One(value) => std::slice::from_ref(value).iter(),
      OneOrMany::Many(values) => values.iter(),
    }
  }
}

/// A provider text node of the form `{"$": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
  /// The text payload.
  #[serde(rename = "$")]
  pub value: String,
}

/// Copyright text: either a plain string or tagged text entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CopyrightField {
  /// Plain string form.
  Text(String),
  /// List-of-text-nodes form; the first entry is the one that counts.
  Entries(Vec<TextValue>),
}

/// One detail record, as returned by the bibliographic provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
  /// Flat core metadata (title, journal, copyright, document type).
  #[serde(default)]
  pub coredata: CoreData,
  /// The author list wrapper.
  #[serde(default)]
  pub authors:  AuthorsField,
  /// The nested bibliographic item tree (year, language, keywords,
  /// abstract).
  #[serde(default)]
  pub item:     ItemField,
}

/// Core metadata block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreData {
  /// Paper title.
  #[serde(rename = "dc:title", default)]
  pub title:               Option<String>,
  /// Human-readable document type ("Article", "Review", ...).
  #[serde(rename = "subtypeDescription", default)]
  pub subtype_description: Option<String>,
  /// Publisher copyright line; string or list form.
  #[serde(rename = "publishercopyright", default)]
  pub publisher_copyright: Option<CopyrightField>,
  /// Journal name.
  #[serde(rename = "prism:publicationName", default)]
  pub publication_name:    Option<String>,
  /// Journal volume.
  #[serde(rename = "prism:volume", default)]
  pub volume:              Option<String>,
  /// Journal issue.
  #[serde(rename = "prism:issueIdentifier", default)]
  pub issue_identifier:    Option<String>,
}

/// Wrapper around the raw author entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorsField {
  /// The entries, in publication order.
  #[serde(rename = "author", default)]
  pub author: Vec<RawAuthorEntry>,
}

/// A single raw author entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthorEntry {
  /// The provider's stable author id.
  #[serde(rename = "@auid", default)]
  pub id:             Option<String>,
  /// Initials fallback when no given name is recorded.
  #[serde(rename = "ce:initials", default)]
  pub initials:       Option<String>,
  /// Provider-formatted `Surname G.N.` form used in citations.
  #[serde(rename = "ce:indexed-name", default)]
  pub indexed_name:   Option<String>,
  /// Preferred name parts.
  #[serde(rename = "preferred-name", default)]
  pub preferred_name: PreferredName,
  /// Affiliation reference(s); object, list, or absent. Kept raw and
  /// normalized in [`RawAuthorEntry::affiliations`].
  #[serde(default)]
  pub affiliation:    Option<Value>,
}

/// Preferred name parts of an author entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferredName {
  /// Given name.
  #[serde(rename = "ce:given-name", default)]
  pub given_name: Option<String>,
  /// Surname.
  #[serde(rename = "ce:surname", default)]
  pub surname:    Option<String>,
}

/// A reference to an affiliation by provider id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliationRef {
  /// The provider's affiliation id.
  #[serde(rename = "@id")]
  pub id: String,
}

/// The `item` subtree of a detail record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemField {
  /// Bibliographic record wrapper.
  #[serde(default)]
  pub bibrecord: Bibrecord,
}

/// The `bibrecord` subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bibrecord {
  /// Record head: source info, citation info, abstract.
  #[serde(default)]
  pub head: RecordHead,
}

/// The `head` subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordHead {
  /// Publication source (journal) info.
  #[serde(default)]
  pub source:        SourceInfo,
  /// Citation info: language and author keywords.
  #[serde(rename = "citation-info", default)]
  pub citation_info: CitationInfo,
  /// Abstract text; explicitly null for some records.
  #[serde(default)]
  pub abstracts:     Option<String>,
}

/// Publication source block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInfo {
  /// Publication date wrapper.
  #[serde(rename = "publicationdate", default)]
  pub publication_date: PublicationDate,
}

/// Publication date parts; only the year is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationDate {
  /// Publication year, as the provider's string.
  #[serde(default)]
  pub year: Option<String>,
}

/// Citation info block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationInfo {
  /// Citation language wrapper.
  #[serde(rename = "citation-language", default)]
  pub citation_language: CitationLanguage,
  /// Raw author-keywords substructure; parsed on access by
  /// [`extract::keywords`](crate::extract::keywords).
  #[serde(rename = "author-keywords", default)]
  pub author_keywords:   Option<Value>,
}

/// Citation language wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationLanguage {
  /// ISO language code.
  #[serde(rename = "@xml:lang", default)]
  pub lang: Option<String>,
}

impl RawRecord {
  /// Paper title.
  pub fn title(&self) -> Result<&str> {
    self.coredata.title.as_deref().ok_or(DepositorError::MissingRequiredField("dc:title"))
  }

  /// Publication year, in the provider's string form.
  pub fn year(&self) -> Result<&str> {
    self
      .item
      .bibrecord
      .head
      .source
      .publication_date
      .year
      .as_deref()
      .ok_or(DepositorError::MissingRequiredField("publicationdate/year"))
  }

  /// ISO language code of the citation.
  pub fn language(&self) -> Result<&str> {
    self
      .item
      .bibrecord
      .head
      .citation_info
      .citation_language
      .lang
      .as_deref()
      .ok_or(DepositorError::MissingRequiredField("citation-language/@xml:lang"))
  }

  /// Human-readable document type.
  pub fn document_type(&self) -> Result<&str> {
    self
      .coredata
      .subtype_description
      .as_deref()
      .ok_or(DepositorError::MissingRequiredField("subtypeDescription"))
  }

  /// Journal name.
  pub fn journal_name(&self) -> Result<&str> {
    self
      .coredata
      .publication_name
      .as_deref()
      .ok_or(DepositorError::MissingRequiredField("prism:publicationName"))
  }

  /// Journal volume, if recorded.
  pub fn volume(&self) -> Option<&str> { self.coredata.volume.as_deref() }

  /// Journal issue, if recorded.
  pub fn issue(&self) -> Option<&str> { self.coredata.issue_identifier.as_deref() }

  /// The raw author entries, in publication order.
  pub fn raw_authors(&self) -> Result<&[RawAuthorEntry]> {
    if self.authors.author.is_empty() {
      Err(DepositorError::EmptyAuthorList)
    } else {
      Ok(&self.authors.author)
    }
  }

  /// Abstract text, if present and non-null.
  pub fn abstract_text(&self) -> Option<&str> { self.item.bibrecord.head.abstracts.as_deref() }
}

impl RawAuthorEntry {
  /// First name for display: preferred given name, falling back to the
  /// provider's initials. Fails only when both are absent.
  pub fn first_name(&self) -> Result<&str> {
    self
      .preferred_name
      .given_name
      .as_deref()
      .or(self.initials.as_deref())
      .ok_or(DepositorError::MissingRequiredField("ce:given-name/ce:initials"))
  }

  /// Surname of the preferred name.
  pub fn surname(&self) -> Result<&str> {
    self.preferred_name.surname.as_deref().ok_or(DepositorError::MissingRequiredField("ce:surname"))
  }

  /// Provider-formatted indexed name used in citations.
  pub fn indexed_name(&self) -> Result<&str> {
    self.indexed_name.as_deref().ok_or(DepositorError::MissingRequiredField("ce:indexed-name"))
  }

  /// The provider's stable author id.
  pub fn author_id(&self) -> Result<&str> {
    self.id.as_deref().ok_or(DepositorError::MissingRequiredField("@auid"))
  }

  /// Affiliation references, normalized from the provider's object-or-list
  /// form.
  ///
  /// Absence means the author has no affiliations. An unrecognized shape is
  /// logged and likewise treated as "no affiliations" — per-author
  /// affiliation noise must not sink the whole record.
  pub fn affiliations(&self) -> Vec<AffiliationRef> {
    let Some(value) = &self.affiliation else {
      return Vec::new();
    };
    match serde_json::from_value::<OneOrMany<AffiliationRef>>(value.clone()) {
      Ok(OneOrMany::One(reference)) => vec![reference],
      Ok(OneOrMany::Many(references)) => references,
      Err(error) => {
        warn!("malformed affiliation entry ({error}), treating author as unaffiliated");
        Vec::new()
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn record(value: Value) -> RawRecord { serde_json::from_value(value).unwrap() }

  #[test]
  fn reads_required_fields() {
    let record = record(json!({
      "coredata": {
        "dc:title": "Example Paper",
        "subtypeDescription": "Article",
        "prism:publicationName": "Science",
      },
      "authors": { "author": [{ "ce:indexed-name": "Smith J." }] },
      "item": { "bibrecord": { "head": {
        "source": { "publicationdate": { "year": "2021" } },
        "citation-info": { "citation-language": { "@xml:lang": "eng" } },
      }}},
    }));

    assert_eq!(record.title().unwrap(), "Example Paper");
    assert_eq!(record.year().unwrap(), "2021");
    assert_eq!(record.language().unwrap(), "eng");
    assert_eq!(record.journal_name().unwrap(), "Science");
    assert_eq!(record.raw_authors().unwrap().len(), 1);
  }

  #[test]
  fn missing_title_is_classified() {
    let record = record(json!({ "authors": { "author": [{}] } }));
    assert!(matches!(record.title(), Err(DepositorError::MissingRequiredField("dc:title"))));
  }

  #[test]
  fn empty_author_list_is_terminal() {
    let record = record(json!({}));
    assert!(matches!(record.raw_authors(), Err(DepositorError::EmptyAuthorList)));
  }

  #[test]
  fn affiliation_accepts_object_and_list() {
    let single: RawAuthorEntry =
      serde_json::from_value(json!({ "affiliation": { "@id": "101" } })).unwrap();
    let many: RawAuthorEntry =
      serde_json::from_value(json!({ "affiliation": [{ "@id": "101" }, { "@id": "102" }] }))
        .unwrap();

    assert_eq!(single.affiliations().len(), 1);
    assert_eq!(many.affiliations().iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), vec![
      "101", "102"
    ]);
  }

  #[test]
  fn malformed_affiliation_recovers_to_unaffiliated() {
    let entry: RawAuthorEntry = serde_json::from_value(json!({ "affiliation": 42 })).unwrap();
    assert!(entry.affiliations().is_empty());
  }

  #[test]
  fn first_name_falls_back_to_initials() {
    let entry: RawAuthorEntry = serde_json::from_value(json!({
      "ce:initials": "J.",
      "preferred-name": { "ce:surname": "Smith" },
    }))
    .unwrap();

    assert_eq!(entry.first_name().unwrap(), "J.");
    assert_eq!(entry.surname().unwrap(), "Smith");
  }
}
