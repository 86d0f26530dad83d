//! `tubeq watch` – live polling view with simulated progress.
//!
//! Two independent timers: an authoritative refresh and a progress tick.
//! Refreshes run as spawned tasks so a slow server can overlap with the next
//! interval; every in-flight listing carries a sequence token and stale
//! responses are discarded on arrival. Ctrl-C tears the loop down, which
//! drops both timers and the in-flight channel.

use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tubeq_core::api::{ApiClient, ApiError};
use tubeq_core::history::HistoryDb;
use tubeq_core::job::JobRecord;
use tubeq_core::sync::{RefreshToken, Synchronizer};

use super::status::print_jobs;

type ListingResult = (RefreshToken, Result<Vec<JobRecord>, ApiError>);

pub async fn run_watch(
    client: &ApiClient,
    history: &HistoryDb,
    refresh_secs: u64,
    tick_secs: u64,
) -> Result<()> {
    let mut sync = Synchronizer::new(client.clone()).with_history(history.clone());

    let (done_tx, mut done_rx) = mpsc::channel::<ListingResult>(8);
    let mut refresh_timer = tokio::time::interval(Duration::from_secs(refresh_secs.max(1)));
    let mut tick_timer = tokio::time::interval(Duration::from_secs(tick_secs.max(1)));

    println!(
        "Watching downloads on {} (refresh {}s, tick {}s; Ctrl-C to stop)",
        client.base_url(),
        refresh_secs.max(1),
        tick_secs.max(1)
    );

    loop {
        tokio::select! {
            _ = refresh_timer.tick() => {
                let token = sync.begin_refresh();
                let client = client.clone();
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = client.list().await;
                    let _ = done_tx.send((token, result)).await;
                });
            }
            Some((token, result)) = done_rx.recv() => {
                match result {
                    Ok(records) => {
                        if sync.apply_refresh(token, records) {
                            sync.mirror_history().await;
                            render(&sync);
                        }
                    }
                    // Fail soft: keep the last list, surface the error.
                    Err(err) => eprintln!("refresh failed: {err}"),
                }
            }
            _ = tick_timer.tick() => {
                if sync.tick() > 0 {
                    render(&sync);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted, stopping timers");
                break;
            }
        }
    }

    Ok(())
}

fn render(sync: &Synchronizer) {
    if sync.jobs().is_empty() {
        println!("No downloads found.");
        return;
    }
    println!();
    print_jobs(sync.jobs());
}
