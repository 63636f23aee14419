//! HTTP provider clients.
//!
//! Implementations of the [`harvest`](crate::harvest) capability traits over
//! the real services: a Scopus-style bibliographic search/detail API and an
//! Unpaywall-style open-access lookup. Both are thin: endpoint construction,
//! one request, and a pointer walk over the JSON body. Everything
//! interpretive lives behind the traits so tests can swap these out.

use std::time::Duration;

use super::*;

mod scopus;
mod unpaywall;

pub use scopus::ScopusSource;
pub use unpaywall::UnpaywallSource;

/// Connect timeout applied to every provider client.
///
/// There is deliberately no retry policy on top: a request that fails marks
/// its DOI unresolved and the batch moves on.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared reqwest client used by the provider implementations.
fn http_client() -> Result<reqwest::Client> {
  Ok(reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?)
}
