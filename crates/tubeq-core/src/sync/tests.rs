//! View-model tests: replace semantics, stale-token discard, tick behavior.

use super::{DownloadList, SimulatedProgress};
use crate::job::{DownloadJob, JobRecord, JobStatus};
use crate::request::{DownloadRequest, Format};

fn record(id: i64, status: &str) -> JobRecord {
    JobRecord {
        id,
        url: format!("https://www.youtube.com/watch?v=vid{id}"),
        format: "mp4".to_string(),
        quality: Some("720p".to_string()),
        status: Some(status.to_string()),
        file_path: None,
        file_name: None,
        progress: None,
    }
}

fn submitted(id: i64) -> DownloadJob {
    let request = DownloadRequest::new(
        &format!("https://www.youtube.com/watch?v=vid{id}"),
        Format::Mp4,
        Some("720p"),
    )
    .unwrap();
    DownloadJob::submitted(id, &request)
}

#[test]
fn submitted_job_appears_as_pending() {
    let mut list = DownloadList::new();
    list.insert_submitted(submitted(42));

    assert_eq!(list.jobs().len(), 1);
    assert_eq!(list.jobs()[0].id, 42);
    assert_eq!(list.jobs()[0].status, JobStatus::Pending);
    assert_eq!(list.jobs()[0].progress, 0);
}

#[test]
fn resubmitting_same_id_replaces_entry() {
    let mut list = DownloadList::new();
    list.insert_submitted(submitted(1));
    list.insert_submitted(submitted(1));
    assert_eq!(list.jobs().len(), 1);
}

#[test]
fn tick_at_95_completes_and_is_idempotent() {
    let mut list = DownloadList::new();
    let advancer = SimulatedProgress::default();
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Processando")]);
    // Drive progress to 95.
    for _ in 0..19 {
        list.tick(&advancer);
    }
    assert_eq!(list.jobs()[0].progress, 95);
    assert_eq!(list.jobs()[0].status, JobStatus::Processing);

    let moved = list.tick(&advancer);
    assert_eq!(moved, 1);
    assert_eq!(list.jobs()[0].progress, 100);
    assert_eq!(list.jobs()[0].status, JobStatus::Completed);

    // Idempotent at the ceiling.
    let moved = list.tick(&advancer);
    assert_eq!(moved, 0);
    assert_eq!(list.jobs()[0].progress, 100);
    assert_eq!(list.jobs()[0].status, JobStatus::Completed);
}

#[test]
fn tick_skips_errored_and_authoritative_jobs() {
    let mut list = DownloadList::new();
    let advancer = SimulatedProgress::default();
    let mut with_progress = record(2, "Processando");
    with_progress.progress = Some(50);
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Erro"), with_progress]);

    let moved = list.tick(&advancer);
    assert_eq!(moved, 0);
    assert_eq!(list.jobs()[0].status, JobStatus::Error);
    assert_eq!(list.jobs()[1].progress, 50);
}

#[test]
fn empty_listing_is_a_synced_state_not_an_error() {
    let mut list = DownloadList::new();
    list.insert_submitted(submitted(1));
    assert!(!list.has_synced());

    let token = list.begin_refresh();
    assert!(list.apply_refresh(token, Vec::new()));
    assert!(list.has_synced());
    assert!(list.jobs().is_empty());
}

#[test]
fn refresh_replaces_list_wholesale() {
    let mut list = DownloadList::new();
    let token = list.begin_refresh();
    list.apply_refresh(
        token,
        vec![record(1, "Processando"), record(2, "Processando")],
    );
    assert_eq!(list.jobs().len(), 2);

    // Job 2 vanished server-side; it must not linger locally.
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Concluído")]);
    assert_eq!(list.jobs().len(), 1);
    assert_eq!(list.jobs()[0].id, 1);
    assert_eq!(list.jobs()[0].status, JobStatus::Completed);
    assert_eq!(list.jobs()[0].progress, 100);
}

#[test]
fn stale_refresh_response_is_discarded() {
    let mut list = DownloadList::new();
    let first = list.begin_refresh();
    let second = list.begin_refresh();

    // The older in-flight response arrives after a newer one was issued.
    assert!(!list.apply_refresh(first, vec![record(9, "Processando")]));
    assert!(list.jobs().is_empty());
    assert!(!list.has_synced());

    assert!(list.apply_refresh(second, vec![record(1, "Processando")]));
    assert_eq!(list.jobs().len(), 1);
    assert_eq!(list.jobs()[0].id, 1);
}

#[test]
fn stale_response_after_newer_apply_is_discarded() {
    let mut list = DownloadList::new();
    let first = list.begin_refresh();
    let second = list.begin_refresh();

    assert!(list.apply_refresh(second, vec![record(1, "Concluído")]));
    assert!(!list.apply_refresh(first, vec![record(9, "Processando")]));
    assert_eq!(list.jobs().len(), 1);
    assert_eq!(list.jobs()[0].id, 1);
}

#[test]
fn simulated_progress_survives_refresh() {
    let mut list = DownloadList::new();
    let advancer = SimulatedProgress::default();
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Processando")]);
    for _ in 0..8 {
        list.tick(&advancer);
    }
    assert_eq!(list.jobs()[0].progress, 40);

    // The server still reports no percentage; the bar must not jump back.
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Processando")]);
    assert_eq!(list.jobs()[0].progress, 40);
}

#[test]
fn custom_step_advances_by_that_amount() {
    let mut list = DownloadList::new();
    let advancer = SimulatedProgress::new(50);
    let token = list.begin_refresh();
    list.apply_refresh(token, vec![record(1, "Processando")]);
    list.tick(&advancer);
    assert_eq!(list.jobs()[0].progress, 50);
    list.tick(&advancer);
    assert_eq!(list.jobs()[0].status, JobStatus::Completed);
}
