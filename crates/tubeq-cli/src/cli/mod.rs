//! CLI for the TubeQ download service client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tubeq_core::api::ApiClient;
use tubeq_core::config;
use tubeq_core::history::HistoryDb;
use tubeq_core::request::Format;

use commands::{run_add, run_fetch, run_history, run_status, run_watch};

/// Top-level CLI for the TubeQ client.
#[derive(Debug, Parser)]
#[command(name = "tubeq")]
#[command(about = "TubeQ: client for a remote YouTube download/transcode service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit a YouTube URL for download/transcode.
    Add {
        /// YouTube watch URL (youtube.com/watch?v=<id> or youtu.be/<id>).
        url: String,

        /// Output format: mp4, mp3, webm, ogg, flac.
        #[arg(long, default_value = "mp4")]
        format: Format,

        /// Output quality for video formats (e.g. best, 1080p, 720p).
        /// Ignored for audio formats.
        #[arg(long)]
        quality: Option<String>,
    },

    /// Show the server's job list once.
    Status,

    /// Live view: poll the server and animate progress until Ctrl-C.
    Watch {
        /// Seconds between listing refreshes (default from config).
        #[arg(long, value_name = "SECS")]
        refresh_secs: Option<u64>,

        /// Seconds between progress ticks (default from config).
        #[arg(long, value_name = "SECS")]
        tick_secs: Option<u64>,
    },

    /// Download a completed job's file by its ID.
    Fetch {
        /// Job identifier.
        id: i64,

        /// Directory to save into (defaults to the configured download dir,
        /// or the current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// List locally cached submissions (works offline).
    History,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let client = ApiClient::new(&cfg.api_base_url)?;
        let history = HistoryDb::open_default().await?;

        match cli.command {
            CliCommand::Add {
                url,
                format,
                quality,
            } => run_add(&client, &history, &url, format, quality.as_deref()).await?,
            CliCommand::Status => run_status(&client, &history).await?,
            CliCommand::Watch {
                refresh_secs,
                tick_secs,
            } => {
                run_watch(
                    &client,
                    &history,
                    refresh_secs.unwrap_or(cfg.refresh_interval_secs),
                    tick_secs.unwrap_or(cfg.tick_interval_secs),
                )
                .await?
            }
            CliCommand::Fetch { id, output_dir } => {
                let dest = match output_dir.or_else(|| cfg.download_dir.clone()) {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_fetch(&client, &history, id, &dest).await?
            }
            CliCommand::History => run_history(&history).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
