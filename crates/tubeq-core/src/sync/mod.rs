//! Download list synchronization.
//!
//! Reconciles three inputs into one client-visible job list: optimistic
//! entries created at submission time, periodic authoritative listings from
//! the backend (wholesale replace), and a local progress ticker for jobs the
//! server reports no percentage for.
//!
//! `DownloadList` is the single-writer view model; nothing outside this
//! module mutates it. `Synchronizer` composes the list with the API client
//! and the history cache. Every in-flight refresh carries a sequence token,
//! so a stale response can never overwrite a newer listing.

mod progress;

pub use progress::{AdvanceProgress, SimulatedProgress, DEFAULT_PROGRESS_STEP};

use std::collections::HashMap;

use crate::api::{ApiClient, ApiError};
use crate::history::HistoryDb;
use crate::job::{DownloadJob, JobRecord, JobStatus};
use crate::request::DownloadRequest;

/// Identifies one in-flight listing request. Only the most recently issued
/// token's response is applied; older ones are discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

/// The client-visible job list.
#[derive(Debug, Default)]
pub struct DownloadList {
    jobs: Vec<DownloadJob>,
    issued: u64,
    synced: bool,
}

impl DownloadList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read accessor; renderers must not mutate entries.
    pub fn jobs(&self) -> &[DownloadJob] {
        &self.jobs
    }

    /// True once at least one refresh has been applied. An empty listing is
    /// a valid synced state ("no downloads found"), distinct from "never
    /// loaded".
    pub fn has_synced(&self) -> bool {
        self.synced
    }

    /// Optimistically insert a job the backend just accepted. Replaces any
    /// existing entry with the same id.
    pub fn insert_submitted(&mut self, job: DownloadJob) {
        match self.jobs.iter_mut().find(|existing| existing.id == job.id) {
            Some(existing) => *existing = job,
            None => self.jobs.push(job),
        }
    }

    /// Issue the sequence token for a refresh about to start.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.issued += 1;
        RefreshToken(self.issued)
    }

    /// Apply a completed listing, replacing the list wholesale: entries
    /// absent from the server snapshot are dropped, known ids are replaced
    /// (no field merging). Simulated progress of a still-Processing id is
    /// carried over so it never moves backwards.
    ///
    /// Returns false (list untouched) when `token` is not the most recently
    /// issued one, i.e. the response is stale.
    pub fn apply_refresh(&mut self, token: RefreshToken, records: Vec<JobRecord>) -> bool {
        if token.0 != self.issued {
            tracing::debug!(
                token = token.0,
                latest = self.issued,
                "discarding stale refresh response"
            );
            return false;
        }
        let prior: HashMap<i64, DownloadJob> =
            self.jobs.drain(..).map(|job| (job.id, job)).collect();
        self.jobs = records
            .into_iter()
            .map(|record| {
                let prev = prior.get(&record.id);
                DownloadJob::from_record(record, prev)
            })
            .collect();
        self.synced = true;
        true
    }

    /// Advance simulated progress for Processing jobs. At 100 the job flips
    /// to Completed; further ticks are no-ops. Returns how many jobs moved.
    pub fn tick(&mut self, advancer: &dyn AdvanceProgress) -> usize {
        let mut advanced = 0;
        for job in &mut self.jobs {
            if job.status != JobStatus::Processing || !job.simulated_progress {
                continue;
            }
            let before = job.progress;
            advancer.advance(job);
            if job.progress >= 100 {
                job.progress = 100;
                job.status = JobStatus::Completed;
            }
            if job.progress != before || job.status == JobStatus::Completed {
                advanced += 1;
            }
        }
        advanced
    }
}

/// Outcome of a successful submission: the optimistic entry plus the
/// server's acknowledgement text.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub job: DownloadJob,
    pub message: String,
}

/// Async facade over `DownloadList`: submit/refresh/tick against the
/// backend, mirroring accepted submissions into the local history cache.
pub struct Synchronizer {
    client: ApiClient,
    history: Option<HistoryDb>,
    advancer: Box<dyn AdvanceProgress + Send + Sync>,
    list: DownloadList,
}

impl Synchronizer {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            history: None,
            advancer: Box::new(SimulatedProgress::default()),
            list: DownloadList::new(),
        }
    }

    /// Mirror accepted submissions into `db` (fallback/history only).
    pub fn with_history(mut self, db: HistoryDb) -> Self {
        self.history = Some(db);
        self
    }

    /// Replace the progress strategy (e.g. with a push-fed one).
    pub fn with_advancer(mut self, advancer: Box<dyn AdvanceProgress + Send + Sync>) -> Self {
        self.advancer = advancer;
        self
    }

    pub fn jobs(&self) -> &[DownloadJob] {
        self.list.jobs()
    }

    pub fn has_synced(&self) -> bool {
        self.list.has_synced()
    }

    /// Send a validated request to the backend. On success the job is
    /// inserted optimistically and recorded in the history cache; on any
    /// error the list is left untouched.
    pub async fn submit(&mut self, request: &DownloadRequest) -> Result<Submitted, ApiError> {
        let accepted = self.client.submit(request).await?;
        tracing::info!(id = accepted.id, url = %request.url, "submission accepted");
        let job = DownloadJob::submitted(accepted.id, request);
        self.list.insert_submitted(job.clone());
        if let Some(history) = &self.history {
            // A cache failure must not fail the submission.
            if let Err(err) = history.record(&job).await {
                tracing::warn!("history cache write failed: {err:#}");
            }
        }
        Ok(Submitted {
            job,
            message: accepted.message,
        })
    }

    /// Fetch the authoritative listing and replace the list wholesale.
    /// On failure the previous list is retained and the error is returned.
    pub async fn refresh(&mut self) -> Result<usize, ApiError> {
        let token = self.list.begin_refresh();
        let records = self.client.list().await?;
        self.list.apply_refresh(token, records);
        self.mirror_history().await;
        Ok(self.list.jobs().len())
    }

    /// Push refreshed statuses into the history cache, for ids it already
    /// knows. Cache failures are logged, never surfaced.
    pub async fn mirror_history(&self) {
        let Some(history) = &self.history else {
            return;
        };
        for job in self.list.jobs() {
            if let Err(err) = history
                .update_status(job.id, job.status, job.file_path.as_deref())
                .await
            {
                tracing::warn!("history cache update failed: {err:#}");
                break;
            }
        }
    }

    /// Token-level refresh API for callers that let listing requests overlap
    /// (see the watch loop): issue here, fetch elsewhere, apply on arrival.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.list.begin_refresh()
    }

    /// Apply a listing fetched under `token`. Stale responses return false.
    pub fn apply_refresh(&mut self, token: RefreshToken, records: Vec<JobRecord>) -> bool {
        self.list.apply_refresh(token, records)
    }

    /// Advance simulated progress once. Returns how many jobs moved.
    pub fn tick(&mut self) -> usize {
        self.list.tick(&*self.advancer)
    }
}

#[cfg(test)]
mod tests;
