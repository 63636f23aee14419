//! DOI identifier handling.
//!
//! Input batches are free text: one line per paper, either a bare DOI
//! (`10.1073/pnas.2215372119`) or a `doi.org` URL in any of its common
//! shapes. [`normalize_line`] reduces both to the bare DOI, and
//! [`canonical_uri`] produces the `https://doi.org/...` form the repository
//! stores.

use std::io::BufRead;

use super::*;

lazy_static! {
  /// A bare DOI, e.g. `10.1145/1327452.1327492`.
  static ref BARE_DOI: Regex = Regex::new(r"^10\.\d{4,9}/[-._;()/:\w]+$").unwrap();
}

/// Normalizes one input line to a bare DOI.
///
/// If the line contains `doi.org`, it is split on `/` and the suffix starting
/// at the first segment beginning with `10.` is joined back together:
///
/// ```
/// use depositor::doi::normalize_line;
///
/// assert_eq!(normalize_line("https://doi.org/10.1073/pnas.2215372119"), "10.1073/pnas.2215372119");
/// assert_eq!(normalize_line("10.1073/pnas.2215372119"), "10.1073/pnas.2215372119");
/// ```
///
/// A `doi.org` line with no `10.` segment passes through trimmed but
/// otherwise verbatim. That input is almost certainly broken upstream, so it
/// is logged, but the lookup miss it produces later keeps the batch moving.
pub fn normalize_line(line: &str) -> String {
  let line = line.trim();
  if line.contains("doi.org") {
    let segments: Vec<&str> = line.split('/').collect();
    if let Some(position) = segments.iter().position(|segment| segment.starts_with("10.")) {
      return segments[position..].join("/");
    }
    warn!("no DOI segment in \"{line}\", passing the line through");
  } else if !BARE_DOI.is_match(line) {
    debug!("input does not look like a bare DOI: \"{line}\"");
  }
  line.to_string()
}

/// The canonical URI form of a DOI: `https://doi.org/<doi>`.
pub fn canonical_uri(doi: &str) -> String { format!("https://doi.org/{doi}") }

/// Reads a batch of DOIs from a line-oriented reader, normalizing each line.
///
/// Blank lines are skipped; order is preserved.
pub fn read_dois(reader: impl BufRead) -> Result<Vec<String>> {
  let mut dois = Vec::new();
  for line in reader.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    dois.push(normalize_line(&line));
  }
  Ok(dois)
}
