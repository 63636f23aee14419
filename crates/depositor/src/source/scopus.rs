//! Scopus-style bibliographic provider client.

use reqwest::header::ACCEPT;

use super::*;
use crate::{config::ProviderConfig, harvest::BibliographicSource, record::RawRecord};

/// API-key header the provider authenticates with.
const API_KEY_HEADER: &str = "X-ELS-APIKey";

/// Client for the bibliographic search and detail endpoints.
pub struct ScopusSource {
  /// Shared HTTP client.
  client:     reqwest::Client,
  /// Search endpoint base, queried as `?query=doi(<doi>)`.
  search_url: String,
  /// Detail endpoint base, suffixed with the stable record id.
  detail_url: String,
  /// Provider API key.
  api_key:    String,
}

impl ScopusSource {
  /// Creates a client from the provider configuration.
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self {
      client:     http_client()?,
      search_url: config.search_url.trim_end_matches('/').to_string(),
      detail_url: config.detail_url.trim_end_matches('/').to_string(),
      api_key:    config.api_key.clone(),
    })
  }
}

#[async_trait]
impl BibliographicSource for ScopusSource {
  async fn search(&self, doi: &str) -> Result<Option<String>> {
    let url = format!("{}?query=doi({doi})", self.search_url);
    debug!("searching bibliographic provider: {url}");

    let response = self
      .client
      .get(&url)
      .header(API_KEY_HEADER, &self.api_key)
      .header(ACCEPT, "application/json")
      .send()
      .await?;
    let body: Value = response.json().await?;
    trace!("search response: {body}");

    // The stable id is the suffix of the first entry's `dc:identifier`
    // (`SCOPUS_ID:85042...`). Any missing piece along the path means the
    // provider has no entry for this DOI.
    Ok(
      body
        .pointer("/search-results/entry/0/dc:identifier")
        .and_then(Value::as_str)
        .and_then(|identifier| identifier.rsplit(':').next())
        .map(str::to_string),
    )
  }

  async fn detail(&self, id: &str) -> Result<RawRecord> {
    let url = format!("{}/{id}", self.detail_url);
    debug!("fetching detail record: {url}");

    let response = self
      .client
      .get(&url)
      .header(API_KEY_HEADER, &self.api_key)
      .header(ACCEPT, "application/json")
      .send()
      .await?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
      return Err(DepositorError::NotFound);
    }
    let body: Value = response.json().await?;

    let record = body
      .get("abstracts-retrieval-response")
      .ok_or(DepositorError::MissingRequiredField("abstracts-retrieval-response"))?;
    Ok(serde_json::from_value(record.clone())?)
  }
}
