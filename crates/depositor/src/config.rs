//! Runtime configuration.
//!
//! One TOML file holds everything a run needs: the provider endpoints and
//! API key, the open-access lookup, the repository endpoint and target
//! collection, the two tracked institution id sets, and the store path.
//! `depositor init` writes [`TEMPLATE`] for the operator to fill in.

use std::fs;

use super::*;
use crate::authors::InstitutionRegistry;

/// Configuration template written by `depositor init`.
pub const TEMPLATE: &str = r#"# depositor configuration

[provider]
# Bibliographic search/detail endpoints and the API key they require.
search_url = "https://api.elsevier.com/content/search/scopus"
detail_url = "https://api.elsevier.com/content/abstract/scopus_id"
api_key    = ""

[open_access]
# Open-access license lookup; the service requires a contact email.
base_url = "https://api.unpaywall.org/v2"
email    = ""

[repository]
# DSpace REST endpoint and the collection new items are deposited into.
base_url   = "https://repository.example.edu/rest/"
collection = ""

[institutions.primary]
# Display tag and provider affiliation ids for the primary institution.
tag = "TTU"
ids = []

[institutions.secondary]
# Affiliated health-sciences institution.
tag = "TTUHSC"
ids = []

[store]
# SQLite database path; defaults to the platform data directory.
# path = "/var/lib/depositor/depositor.db"
"#;

/// Bibliographic provider endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
  /// Search endpoint base URL.
  pub search_url: String,
  /// Detail endpoint base URL.
  pub detail_url: String,
  /// Provider API key.
  pub api_key:    String,
}

/// Open-access lookup endpoint and contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccessConfig {
  /// Lookup base URL.
  pub base_url: String,
  /// Contact email passed as a query parameter.
  pub email:    String,
}

/// Repository endpoint and target collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
  /// REST base URL.
  pub base_url:   String,
  /// UUID of the collection new items are created in.
  pub collection: String,
}

/// Store location override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
  /// SQLite database path; platform default when unset.
  pub path: Option<PathBuf>,
}

impl StoreConfig {
  /// The effective store path.
  pub fn path(&self) -> PathBuf {
    self.path.clone().unwrap_or_else(crate::store::Store::default_path)
  }
}

/// The full runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Bibliographic provider.
  pub provider:     ProviderConfig,
  /// Open-access lookup.
  pub open_access:  OpenAccessConfig,
  /// Institutional repository.
  pub repository:   RepositoryConfig,
  /// Tracked institutions.
  pub institutions: InstitutionRegistry,
  /// Store location.
  #[serde(default)]
  pub store:        StoreConfig,
}

impl Config {
  /// Default configuration file location under the platform config dir.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("depositor").join("config.toml")
  }

  /// Loads the configuration from a TOML file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|error| {
      DepositorError::Config(format!("couldn't read config at {}: {error}", path.display()))
    })?;
    Ok(toml::from_str(&content)?)
  }

  /// Writes the configuration template, creating parent directories.
  pub fn write_default(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, TEMPLATE)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_parses() {
    let config: Config = toml::from_str(TEMPLATE).unwrap();
    assert_eq!(config.institutions.primary.tag, "TTU");
    assert!(config.institutions.primary.ids.is_empty());
    assert!(config.store.path.is_none());
  }
}
