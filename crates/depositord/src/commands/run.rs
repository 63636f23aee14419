//! Batch harvest-and-deposit command.

use std::{fs::File, io::BufReader, time::Instant};

use chrono::Utc;
use depositor::{
  doi::{canonical_uri, read_dois},
  harvest::{HarvestReport, Harvester},
  repository::{DSpaceRepository, Repository},
  source::{ScopusSource, UnpaywallSource},
  store::{PublicationRow, RunMetrics, Store},
};
use dialoguer::{Input, Password};

use super::*;

/// Runs the full pipeline over a file of DOIs.
///
/// With `--dry-run`, stops after harvesting and prints the citations that
/// would be deposited; no login, deposit, or persistence happens.
pub async fn run(cli: &Cli, dois_file: PathBuf, dry_run: bool) -> Result<()> {
  let config = Config::from_path(cli.config_path())?;
  tracing::debug!("loaded configuration from {}", cli.config_path().display());

  let file = File::open(&dois_file)?;
  let mut dois = read_dois(BufReader::new(file))?;
  if dois.is_empty() {
    println!("{} No DOIs found in {}", style(WARNING_PREFIX).yellow(), dois_file.display());
    return Ok(());
  }

  let started = Instant::now();
  let today = Utc::now().date_naive();

  let mut repository = DSpaceRepository::new(&config.repository)?;
  if !dry_run {
    let email: String = Input::new().with_prompt("Repository email").interact_text()?;
    let password = Password::new().with_prompt("Repository password").interact()?;
    repository.login(&email, &password).await?;

    // Drop DOIs that already have an item in the target collection.
    println!("{} Checking for duplicates in the repository", style(INFO_PREFIX).blue());
    let mut kept = Vec::with_capacity(dois.len());
    for doi in dois {
      if repository.is_duplicate(&canonical_uri(&doi)).await? {
        println!("{} {doi} is already in the collection", style(WARNING_PREFIX).yellow());
      } else {
        kept.push(doi);
      }
    }
    dois = kept;
  }

  println!("{} {} valid DOI(s) identified", style(INFO_PREFIX).blue(), dois.len());
  if dois.is_empty() {
    return Ok(());
  }

  let harvester = Harvester::new(
    ScopusSource::new(&config.provider)?,
    UnpaywallSource::new(&config.open_access)?,
    config.institutions.clone(),
    today,
  );
  let report = harvester.run(&dois).await;

  if dry_run {
    for harvested in &report.papers {
      println!("{} {}", style(SUCCESS_PREFIX).green(), harvested.paper.citation);
    }
    summarize(&report);
    return Ok(());
  }

  let store = Store::open(config.store.path()).await?;
  let mut uploaded = 0;
  let mut deposit_errors = false;
  for harvested in &report.papers {
    match repository.deposit(&harvested.paper).await {
      Ok(receipt) => {
        uploaded += 1;
        store.add_new_authors(harvested.new_authors.clone()).await?;
        store
          .record_publication(PublicationRow {
            handle:         receipt.handle.clone(),
            title:          harvested.paper.title.clone(),
            doi:            harvested.doi.clone(),
            year_issued:    harvested.paper.year.parse().unwrap_or_default(),
            date_available: today,
          })
          .await?;
        store.link_authors(&receipt.handle, harvested.institutional_ids()).await?;
      },
      Err(error) => {
        deposit_errors = true;
        eprintln!(
          "{} Couldn't deposit {}: {error}",
          style(ERROR_PREFIX).red(),
          harvested.paper.doi_uri
        );
      },
    }
  }

  store
    .record_run(RunMetrics {
      valid_dois: dois.len() as u32,
      uploaded_items: uploaded,
      error: deposit_errors || !report.unresolved.is_empty(),
      date_ran: today,
      run_time_secs: started.elapsed().as_secs_f64(),
    })
    .await?;

  println!("{} Deposited {uploaded} paper(s)", style(SUCCESS_PREFIX).green());
  summarize(&report);
  Ok(())
}

/// Prints the succeeded/unresolved summary for a run.
fn summarize(report: &HarvestReport) {
  println!(
    "{} {} succeeded, {} unresolved",
    style(INFO_PREFIX).blue(),
    report.succeeded(),
    report.failed()
  );
  for unresolved in &report.unresolved {
    println!("{} {}: {}", style(WARNING_PREFIX).yellow(), unresolved.doi, unresolved.reason);
  }
}
