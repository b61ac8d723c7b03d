// CrashRepo tests: init, range filtering, daily grouping, orchestrated report

mod common;

use common::day;
use crashwatch::crash_repo::CrashRepo;
use crashwatch::date_range::DateRange;
use crashwatch::query::QueryOrchestrator;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Opens the repo and a second pool playing the monitor that writes crashes.
async fn setup(dir: &TempDir) -> (CrashRepo, SqlitePool) {
    let path = dir.path().join("crashes.db");
    let path_str = path.to_str().unwrap();
    let repo = CrashRepo::connect(path_str, 2, 5).await.unwrap();
    repo.init().await.unwrap();
    let writer = SqlitePool::connect(&format!("sqlite:{}", path_str))
        .await
        .unwrap();
    (repo, writer)
}

async fn insert_crash(
    pool: &SqlitePool,
    id: &str,
    name: Option<&str>,
    logs: Option<&str>,
    crashed_on: &str,
) {
    sqlx::query(
        "INSERT INTO crashedcontainers (container_id, container_name, logs, crashedon) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(name)
    .bind(logs)
    .bind(crashed_on)
    .execute(pool)
    .await
    .unwrap();
}

fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> DateRange {
    DateRange::validate(Some(day(from.0, from.1, from.2)), Some(day(to.0, to.1, to.2))).unwrap()
}

#[tokio::test]
async fn crash_repo_connect_and_init() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = setup(&dir).await;
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
    let events = repo
        .get_crash_events(&range((2024, 5, 1), (2024, 5, 7)))
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn crash_repo_events_filtered_by_inclusive_days_and_ordered() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", Some("web"), Some("E2"), "2024-05-02 08:00:00").await;
    insert_crash(&writer, "a", Some("web"), Some("E1"), "2024-05-01 00:00:01").await;
    insert_crash(&writer, "b", Some("db"), Some("late"), "2024-05-07 23:59:59").await;
    insert_crash(&writer, "b", Some("db"), Some("out"), "2024-05-08 00:00:00").await;
    insert_crash(&writer, "c", Some("old"), Some("out"), "2024-04-30 23:59:59").await;

    let events = repo
        .get_crash_events(&range((2024, 5, 1), (2024, 5, 7)))
        .await
        .unwrap();
    let logs: Vec<&str> = events.iter().map(|e| e.log_text.as_str()).collect();
    assert_eq!(logs, ["E1", "E2", "late"]);
    assert_eq!(
        events[0].crashed_on,
        Some(day(2024, 5, 1).and_hms_opt(0, 0, 1).unwrap())
    );
}

#[tokio::test]
async fn crash_repo_null_columns_map_to_empty_strings() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", None, None, "2024-05-01 10:00:00").await;

    let events = repo
        .get_crash_events(&range((2024, 5, 1), (2024, 5, 1)))
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].container_name, "");
    assert_eq!(events[0].log_text, "");
}

#[tokio::test]
async fn crash_repo_daily_counts_grouped_by_day_and_container() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", Some("web"), Some("x"), "2024-05-01 01:00:00").await;
    insert_crash(&writer, "a", Some("web"), Some("x"), "2024-05-01 13:00:00").await;
    insert_crash(&writer, "b", Some("web"), Some("x"), "2024-05-01 14:00:00").await;
    insert_crash(&writer, "a", Some("web"), Some("x"), "2024-05-03 09:00:00").await;

    let records = repo
        .get_daily_crash_counts(&range((2024, 5, 1), (2024, 5, 3)))
        .await
        .unwrap();
    assert_eq!(records.len(), 3);

    let a_first = records
        .iter()
        .find(|r| r.container_id == "a" && r.crashed_on == Some(day(2024, 5, 1)))
        .unwrap();
    assert_eq!(a_first.crash_count, 2);
    let b_first = records
        .iter()
        .find(|r| r.container_id == "b")
        .unwrap();
    assert_eq!(b_first.crash_count, 1);
    assert_eq!(records.last().unwrap().crashed_on, Some(day(2024, 5, 3)));
}

#[tokio::test]
async fn crash_repo_daily_counts_use_name_of_earliest_crash() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", Some("web-new"), Some("x"), "2024-05-01 20:00:00").await;
    insert_crash(&writer, "a", Some("web"), Some("x"), "2024-05-01 08:00:00").await;

    let records = repo
        .get_daily_crash_counts(&range((2024, 5, 1), (2024, 5, 1)))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].container_name, "web");
    assert_eq!(records[0].crash_count, 2);
}

#[tokio::test]
async fn crash_repo_feeds_orchestrated_report() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", Some("web"), Some("E1"), "2024-05-01 08:00:00").await;
    insert_crash(&writer, "a", Some("web"), Some("E2"), "2024-05-02 08:00:00").await;
    insert_crash(&writer, "b", Some("db"), Some("E3"), "2024-05-01 09:00:00").await;

    let report = QueryOrchestrator::new(Arc::new(repo))
        .query(&range((2024, 5, 1), (2024, 5, 7)))
        .await;

    assert_eq!(report.transcript("a").unwrap().log_text, "E1\n\nE2");
    assert_eq!(report.transcript("b").unwrap().log_text, "E3");
    assert_eq!(report.series.dates, vec![day(2024, 5, 1), day(2024, 5, 2)]);
    assert_eq!(report.series.series("a"), Some(&[1, 1][..]));
    assert_eq!(report.series.series("b"), Some(&[1, 0][..]));
}

#[tokio::test]
async fn crash_repo_unreadable_timestamp_does_not_drop_other_events() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    insert_crash(&writer, "a", Some("web"), Some("E1"), "2024-05-01").await;
    insert_crash(&writer, "b", Some("db"), Some("E2"), "2024-05-01 09:00:00").await;

    let day_range = range((2024, 5, 1), (2024, 5, 1));
    let events = repo.get_crash_events(&day_range).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].crashed_on,
        Some(day(2024, 5, 1).and_hms_opt(0, 0, 0).unwrap())
    );

    let report = QueryOrchestrator::new(Arc::new(repo))
        .query(&day_range)
        .await;
    assert_eq!(report.transcripts.len(), 2);
    assert_eq!(report.transcript("a").unwrap().log_text, "E1");
    assert_eq!(report.transcript("b").unwrap().log_text, "E2");
    assert_eq!(report.series.containers.len(), 2);
}

#[tokio::test]
async fn crash_repo_garbage_timestamp_maps_to_undated_event() {
    let dir = TempDir::new().unwrap();
    let (repo, writer) = setup(&dir).await;
    // date() reads this, chrono's formats do not.
    insert_crash(&writer, "a", Some("web"), Some("E1"), "2024-05-01 08:00").await;
    insert_crash(&writer, "b", Some("db"), Some("E2"), "2024-05-01 09:00:00").await;

    let events = repo
        .get_crash_events(&range((2024, 5, 1), (2024, 5, 1)))
        .await
        .unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].crashed_on.is_none());
    assert_eq!(events[0].log_text, "E1");
    assert!(events[1].crashed_on.is_some());
}
