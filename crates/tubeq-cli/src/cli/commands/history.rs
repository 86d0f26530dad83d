//! `tubeq history` – list locally cached submissions.

use anyhow::Result;
use tubeq_core::history::HistoryDb;

pub async fn run_history(db: &HistoryDb) -> Result<()> {
    let entries = db.list().await?;
    if entries.is_empty() {
        println!("No cached submissions.");
        return Ok(());
    }
    println!(
        "{:<6} {:<12} {:<6} {:<8} {}",
        "ID", "STATUS", "FMT", "QUALITY", "URL"
    );
    for entry in entries {
        println!(
            "{:<6} {:<12} {:<6} {:<8} {}",
            entry.id,
            format!("{:?}", entry.status).to_lowercase(),
            entry.format,
            entry.quality.as_deref().unwrap_or("-"),
            entry.url
        );
    }
    Ok(())
}
