//! Rows of the submitted-jobs cache.

use crate::job::{JobId, JobStatus};

/// One cached submission, as shown by `tubeq history`.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: JobId,
    pub url: String,
    pub format: String,
    pub quality: Option<String>,
    pub status: JobStatus,
    pub file_path: Option<String>,
    pub created_at: i64,
}
