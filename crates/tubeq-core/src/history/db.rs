//! SQLite-backed cache implementation.
//!
//! Connection handling, schema, and timestamp helper. Row operations live in
//! `store`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Handle to the submitted-jobs cache.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/tubeq/history.db`.
#[derive(Clone)]
pub struct HistoryDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl HistoryDb {
    /// Open (or create) the default cache and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("tubeq")?;
        let state_dir = xdg_dirs.get_state_home().join("tubeq");
        tokio::fs::create_dir_all(&state_dir).await?;
        Self::open_at(state_dir.join("history.db")).await
    }

    /// Open (or create) the cache at a specific path. Creates parent dirs if
    /// needed. Intended for tests so the DB can live in a temp directory.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = format!("sqlite://{}?mode=rwc", encode_sqlite_path(path));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = HistoryDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // One table mirroring the backend's job shape. `id` is the
        // server-assigned job id, so re-recording a job updates in place.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS downloads (
                id INTEGER PRIMARY KEY,
                url TEXT NOT NULL,
                format TEXT NOT NULL,
                quality TEXT,
                status TEXT NOT NULL,
                file_path TEXT,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Percent-encode characters that would break a sqlite:// URI.
fn encode_sqlite_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            other => out.push(other),
        }
    }
    out
}

/// Current time as Unix seconds (for row timestamps). Pub for use by `store`.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory cache for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<HistoryDb> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = HistoryDb { pool };
    db.migrate().await?;
    Ok(db)
}
