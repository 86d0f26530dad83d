//! `tubeq add <url>` – submit a download request to the backend.

use anyhow::Result;
use tubeq_core::api::ApiClient;
use tubeq_core::history::HistoryDb;
use tubeq_core::request::{DownloadRequest, Format};
use tubeq_core::sync::Synchronizer;

pub async fn run_add(
    client: &ApiClient,
    history: &HistoryDb,
    url: &str,
    format: Format,
    quality: Option<&str>,
) -> Result<()> {
    // Validation happens here, before any network call.
    let request = DownloadRequest::new(url, format, quality)?;

    let mut sync = Synchronizer::new(client.clone()).with_history(history.clone());
    let submitted = sync.submit(&request).await?;

    println!("{}", submitted.message);
    println!(
        "Job {} queued: {} ({}, {})",
        submitted.job.id,
        request.url,
        format,
        request.quality.as_deref().unwrap_or("best"),
    );
    Ok(())
}
