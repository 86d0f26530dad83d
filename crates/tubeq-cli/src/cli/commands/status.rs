//! `tubeq status` – one-shot refresh of the server job list.

use anyhow::Result;
use tubeq_core::api::ApiClient;
use tubeq_core::history::HistoryDb;
use tubeq_core::job::DownloadJob;
use tubeq_core::sync::Synchronizer;

pub async fn run_status(client: &ApiClient, history: &HistoryDb) -> Result<()> {
    let mut sync = Synchronizer::new(client.clone());
    match sync.refresh().await {
        Ok(0) => println!("No downloads found."),
        Ok(_) => print_jobs(sync.jobs()),
        Err(err) => {
            // Fail soft on read: keep what we know, fall back to the cache.
            eprintln!("Could not load downloads from the server: {err}");
            let cached = history.list().await?;
            if cached.is_empty() {
                println!("No cached submissions either.");
            } else {
                println!("Showing {} cached submission(s) instead:", cached.len());
                for entry in cached {
                    println!(
                        "{:<6} {:<12} {:<6} {}",
                        entry.id,
                        format!("{:?}", entry.status).to_lowercase(),
                        entry.format,
                        entry.url
                    );
                }
            }
        }
    }
    Ok(())
}

pub(super) fn print_jobs(jobs: &[DownloadJob]) {
    println!(
        "{:<6} {:<12} {:<6} {:<8} {:>5} {}",
        "ID", "STATUS", "FMT", "QUALITY", "PROG", "URL"
    );
    for job in jobs {
        println!(
            "{:<6} {:<12} {:<6} {:<8} {:>4}% {}",
            job.id,
            format!("{:?}", job.status).to_lowercase(),
            job.format,
            job.quality.as_deref().unwrap_or("-"),
            job.progress,
            job.url
        );
    }
}
