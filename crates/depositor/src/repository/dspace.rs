//! DSpace REST client.
//!
//! Speaks the classic DSpace REST API: form login yielding a `JSESSIONID`
//! cookie, a metadata-field probe for duplicate detection, and item creation
//! returning an XML receipt.

use reqwest::header::{COOKIE, SET_COOKIE};

use super::*;
use crate::config::RepositoryConfig;

/// Session cookie name issued by the repository.
const SESSION_COOKIE: &str = "JSESSIONID";

/// Client for a DSpace-style repository.
pub struct DSpaceRepository {
  /// Shared HTTP client.
  client:     reqwest::Client,
  /// REST base URL, normalized to end with `/`.
  base_url:   String,
  /// Target collection UUID.
  collection: String,
  /// Session cookie value, present after a successful login.
  session:    Option<String>,
}

impl DSpaceRepository {
  /// Creates a client from the repository configuration. No session exists
  /// until [`Repository::login`] succeeds.
  pub fn new(config: &RepositoryConfig) -> Result<Self> {
    Ok(Self {
      client:     reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()?,
      base_url:   format!("{}/", config.base_url.trim_end_matches('/')),
      collection: config.collection.clone(),
      session:    None,
    })
  }

  /// Full endpoint URL for a path under the REST base.
  fn endpoint(&self, path: &str) -> String { format!("{}{path}", self.base_url) }

  /// The `Cookie` header value for the current session.
  fn session_cookie(&self) -> Result<String> {
    self
      .session
      .as_ref()
      .map(|session| format!("{SESSION_COOKIE}={session}"))
      .ok_or_else(|| DepositorError::Repository("not logged in to the repository".to_string()))
  }
}

/// An item returned by the duplicate probe.
#[derive(Debug, Deserialize)]
struct FoundItem {
  /// Owning collection, expanded by the probe.
  #[serde(rename = "parentCollection", default)]
  parent_collection: Option<ParentCollection>,
}

/// Collection reference inside a found item.
#[derive(Debug, Deserialize)]
struct ParentCollection {
  /// Collection UUID.
  uuid: String,
}

#[async_trait]
impl Repository for DSpaceRepository {
  async fn login(&mut self, email: &str, password: &str) -> Result<()> {
    let response = self
      .client
      .post(self.endpoint("login"))
      .form(&[("email", email), ("password", password)])
      .send()
      .await?;
    if !response.status().is_success() {
      return Err(DepositorError::Repository(format!("login failed: {}", response.status())));
    }

    let prefix = format!("{SESSION_COOKIE}=");
    let session = response
      .headers()
      .get_all(SET_COOKIE)
      .iter()
      .filter_map(|header| header.to_str().ok())
      .filter_map(|cookie| cookie.split(';').next())
      .find_map(|pair| pair.trim().strip_prefix(prefix.as_str()))
      .map(str::to_string)
      .ok_or_else(|| {
        DepositorError::Repository("login response carried no session cookie".to_string())
      })?;
    self.session = Some(session);
    Ok(())
  }

  async fn is_duplicate(&self, doi_uri: &str) -> Result<bool> {
    let url = self.endpoint("items/find-by-metadata-field?expand=parentCollection");
    let body = serde_json::json!({ "key": "dc.identifier.uri", "value": doi_uri });

    let response =
      self.client.post(&url).header(COOKIE, self.session_cookie()?).json(&body).send().await?;
    if !response.status().is_success() {
      // The probe is advisory; a failed probe must not block the deposit.
      debug!("duplicate probe for {doi_uri} answered {}", response.status());
      return Ok(false);
    }

    let items: Vec<FoundItem> = response.json().await?;
    Ok(
      items.iter().any(|item| {
        item.parent_collection.as_ref().is_some_and(|parent| parent.uuid == self.collection)
      }),
    )
  }

  async fn deposit(&self, paper: &NormalizedPaper) -> Result<DepositReceipt> {
    let url = self.endpoint(&format!("collections/{}/items", self.collection));
    let body = serde_json::json!({ "metadata": metadata_entries(paper) });
    debug!("depositing {} to {url}", paper.doi_uri);

    let response =
      self.client.post(&url).header(COOKIE, self.session_cookie()?).json(&body).send().await?;
    if !response.status().is_success() {
      return Err(DepositorError::Repository(format!(
        "deposit failed for {}: {}",
        paper.doi_uri,
        response.status()
      )));
    }

    let xml = response.text().await?;
    trace!("deposit receipt: {xml}");
    Ok(quick_xml::de::from_str(&xml)?)
  }
}
