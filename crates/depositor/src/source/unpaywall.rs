//! Unpaywall-style open-access lookup client.

use super::*;
use crate::{config::OpenAccessConfig, harvest::OpenAccessSource};

/// Client for the open-access license endpoint.
pub struct UnpaywallSource {
  /// Shared HTTP client.
  client:   reqwest::Client,
  /// Lookup base URL, suffixed with the DOI.
  base_url: String,
  /// Contact email the service requires as a query parameter.
  email:    String,
}

impl UnpaywallSource {
  /// Creates a client from the open-access configuration.
  pub fn new(config: &OpenAccessConfig) -> Result<Self> {
    Ok(Self {
      client:   http_client()?,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      email:    config.email.clone(),
    })
  }
}

#[async_trait]
impl OpenAccessSource for UnpaywallSource {
  async fn license(&self, doi: &str) -> Result<Option<String>> {
    let url = format!("{}/{doi}?email={}", self.base_url, self.email);
    debug!("looking up open-access license: {url}");

    let response = self.client.get(&url).send().await?;
    let body: Value = response.json().await?;

    // `best_oa_location` is null when no OA copy is indexed; that is a
    // normal answer, not an error.
    Ok(body.pointer("/best_oa_location/license").and_then(Value::as_str).map(str::to_string))
  }
}
