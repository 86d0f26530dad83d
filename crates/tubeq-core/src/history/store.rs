//! Row operations: record (upsert), list, get.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, HistoryDb};
use super::entry::HistoryEntry;
use crate::job::{DownloadJob, JobId, JobStatus};

impl HistoryDb {
    /// Insert or update a job, keyed by the server-assigned id. Status and
    /// file path are refreshed; the original created_at is kept on update.
    pub async fn record(&self, job: &DownloadJob) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT INTO downloads (id, url, format, quality, status, file_path, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                file_path = excluded.file_path
            "#,
        )
        .bind(job.id)
        .bind(&job.url)
        .bind(&job.format)
        .bind(&job.quality)
        .bind(job.status.as_wire_str())
        .bind(&job.file_path)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Refresh status/file path for an already-cached job. Jobs that were
    /// never submitted from this client are not inserted.
    pub async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        file_path: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE downloads
            SET status = ?1,
                file_path = COALESCE(?2, file_path)
            WHERE id = ?3
            "#,
        )
        .bind(status.as_wire_str())
        .bind(file_path)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All cached submissions, newest first.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, url, format, quality, status, file_path, created_at
            FROM downloads
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(entry_from_row(&row));
        }
        Ok(out)
    }

    /// A single cached submission by job id.
    pub async fn get(&self, id: JobId) -> Result<Option<HistoryEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, url, format, quality, status, file_path, created_at
            FROM downloads
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| entry_from_row(&row)))
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> HistoryEntry {
    let status: String = row.get("status");
    HistoryEntry {
        id: row.get("id"),
        url: row.get("url"),
        format: row.get("format"),
        quality: row.get("quality"),
        status: JobStatus::from_wire(&status),
        file_path: row.get("file_path"),
        created_at: row.get("created_at"),
    }
}
