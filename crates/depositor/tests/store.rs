//! Store integration tests on throwaway databases.

use chrono::NaiveDate;
use depositor::{
  authors::NewAuthorRecord,
  store::{PublicationRow, RunMetrics, Store},
};
use tempfile::tempdir;

fn author(id: &str) -> NewAuthorRecord {
  NewAuthorRecord {
    author_id:       id.to_string(),
    first_name:      "Ada".to_string(),
    last_name:       "Lovelace".to_string(),
    last_contacted:  NaiveDate::from_ymd_opt(2022, 3, 27).unwrap(),
    health_sciences: false,
  }
}

#[tokio::test]
async fn authors_insert_only_once() {
  let dir = tempdir().unwrap();
  let store = Store::open(dir.path().join("store.db")).await.unwrap();

  assert!(!store.known_author("1").await.unwrap());
  assert_eq!(store.add_new_authors(vec![author("1"), author("2")]).await.unwrap(), 2);
  assert!(store.known_author("1").await.unwrap());

  // Replaying the same candidates (plus one genuinely new) only inserts the
  // new one.
  assert_eq!(store.add_new_authors(vec![author("1"), author("3")]).await.unwrap(), 1);
}

#[tokio::test]
async fn publications_link_to_authors() {
  let dir = tempdir().unwrap();
  let store = Store::open(dir.path().join("store.db")).await.unwrap();

  store.add_new_authors(vec![author("1")]).await.unwrap();
  store
    .record_publication(PublicationRow {
      handle:         "2346/91011".to_string(),
      title:          "Example Paper".to_string(),
      doi:            "10.1/2".to_string(),
      year_issued:    2021,
      date_available: NaiveDate::from_ymd_opt(2023, 3, 27).unwrap(),
    })
    .await
    .unwrap();
  store.link_authors("2346/91011", vec!["1".to_string()]).await.unwrap();
}

#[tokio::test]
async fn empty_runs_record_no_metrics() {
  let dir = tempdir().unwrap();
  let store = Store::open(dir.path().join("store.db")).await.unwrap();

  store.record_run(RunMetrics::default()).await.unwrap();
  assert_eq!(store.runs_recorded().await.unwrap(), 0);

  store
    .record_run(RunMetrics {
      valid_dois:     3,
      uploaded_items: 2,
      error:          true,
      date_ran:       NaiveDate::from_ymd_opt(2023, 3, 27).unwrap(),
      run_time_secs:  1.5,
    })
    .await
    .unwrap();
  assert_eq!(store.runs_recorded().await.unwrap(), 1);
}
