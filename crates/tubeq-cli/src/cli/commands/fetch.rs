//! `tubeq fetch <id>` – download a completed job's file.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tubeq_core::api::ApiClient;
use tubeq_core::history::HistoryDb;
use tubeq_core::job::JobStatus;

pub async fn run_fetch(
    client: &ApiClient,
    history: &HistoryDb,
    id: i64,
    dest_dir: &Path,
) -> Result<()> {
    // The server listing is authoritative; the cache only steps in when the
    // server cannot be reached.
    let (file_path, status) = match client.list().await {
        Ok(records) => {
            let record = records
                .into_iter()
                .find(|record| record.id == id)
                .with_context(|| format!("no job with id {id} on the server"))?;
            let status = record
                .status
                .as_deref()
                .map(JobStatus::from_wire)
                .unwrap_or(JobStatus::Completed);
            (record.file_path, status)
        }
        Err(err) => {
            eprintln!("Could not load downloads from the server: {err}");
            let entry = history
                .get(id)
                .await?
                .with_context(|| format!("no cached job with id {id}"))?;
            (entry.file_path, entry.status)
        }
    };

    if status != JobStatus::Completed {
        bail!(
            "job {id} is not completed yet ({})",
            format!("{status:?}").to_lowercase()
        );
    }
    let Some(file_path) = file_path else {
        bail!("job {id} has no file path yet");
    };

    tokio::fs::create_dir_all(dest_dir).await?;
    let saved = client.fetch_file(&file_path, dest_dir).await?;
    println!("Saved to {}", saved.display());
    Ok(())
}
