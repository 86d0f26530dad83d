//! Job model: wire records from the backend and the client-visible view entries.

use serde::{Deserialize, Serialize};

use crate::request::DownloadRequest;

/// Job identifier assigned by the backend on a successful submission.
pub type JobId = i64;

/// High-level job state as reported by the backend.
///
/// The wire vocabulary is the backend's own (partly Portuguese) and is
/// reproduced for compatibility; parsing also accepts the English spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl JobStatus {
    /// Canonical wire string, as the backend emits it.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Processing => "Processando",
            JobStatus::Completed => "Concluído",
            JobStatus::Error => "Erro",
        }
    }

    /// Parse a wire status. Unrecognized values map to Error.
    pub fn from_wire(s: &str) -> Self {
        match s.trim() {
            "Pending" | "Pendente" => JobStatus::Pending,
            "Processando" | "Processing" => JobStatus::Processing,
            "Concluído" | "Concluido" | "Completed" => JobStatus::Completed,
            "Erro" | "Error" => JobStatus::Error,
            _ => JobStatus::Error,
        }
    }

}

/// Wire shape of one entry of `GET /downloads`.
///
/// `status` may be absent (legacy rows are implicitly completed) and
/// `progress` is tolerated for a backend that starts reporting percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    pub url: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

/// One entry of the client-visible download list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub id: JobId,
    pub url: String,
    pub format: String,
    pub quality: Option<String>,
    pub status: JobStatus,
    /// Percentage in 0..=100, non-decreasing while Processing.
    pub progress: u8,
    /// True when `progress` is fabricated locally (no server signal).
    pub simulated_progress: bool,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
}

impl DownloadJob {
    /// Optimistic entry for a request the backend just accepted.
    pub fn submitted(id: JobId, request: &DownloadRequest) -> Self {
        Self {
            id,
            url: request.url.clone(),
            format: request.format.as_str().to_string(),
            quality: request.quality.clone(),
            status: JobStatus::Pending,
            progress: 0,
            simulated_progress: true,
            file_name: None,
            file_path: None,
        }
    }

    /// Build a view entry from a server record.
    ///
    /// `prior` is the entry previously displayed for the same id, if any;
    /// simulated progress of a still-Processing job is carried over so the
    /// bar never moves backwards across refreshes. Completed implies 100,
    /// and an authoritative 100 implies Completed.
    pub fn from_record(record: JobRecord, prior: Option<&DownloadJob>) -> Self {
        let mut status = record
            .status
            .as_deref()
            .map(JobStatus::from_wire)
            .unwrap_or(JobStatus::Completed);

        let (mut progress, simulated_progress) = match record.progress {
            Some(p) => (p.min(100), false),
            None => match status {
                JobStatus::Completed => (100, false),
                JobStatus::Error => (prior.map_or(0, |p| p.progress), false),
                JobStatus::Pending => (0, true),
                JobStatus::Processing => {
                    let carried = prior
                        .filter(|p| p.status == JobStatus::Processing)
                        .map_or(0, |p| p.progress);
                    (carried, true)
                }
            },
        };

        if progress >= 100 {
            progress = 100;
            if status != JobStatus::Error {
                status = JobStatus::Completed;
            }
        }

        Self {
            id: record.id,
            url: record.url,
            format: record.format,
            quality: record.quality,
            status,
            progress,
            simulated_progress,
            file_name: record.file_name,
            file_path: record.file_path,
        }
    }
}
