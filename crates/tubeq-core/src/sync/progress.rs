//! Progress advancement for jobs without server-reported percentages.

use crate::job::DownloadJob;

/// Strategy for advancing one job's progress between refreshes.
///
/// The list only calls this for Processing jobs whose progress is locally
/// simulated; a push-based status channel can replace the implementation
/// without touching the list logic.
pub trait AdvanceProgress {
    /// Advance `job`'s progress toward completion.
    fn advance(&self, job: &mut DownloadJob);
}

/// Step applied on every tick, in percent.
pub const DEFAULT_PROGRESS_STEP: u8 = 5;

/// Fixed-step simulated progress, a presentation affordance for as long as
/// the backend reports no granular completion percentage.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedProgress {
    step: u8,
}

impl SimulatedProgress {
    pub fn new(step: u8) -> Self {
        Self { step }
    }
}

impl Default for SimulatedProgress {
    fn default() -> Self {
        Self {
            step: DEFAULT_PROGRESS_STEP,
        }
    }
}

impl AdvanceProgress for SimulatedProgress {
    fn advance(&self, job: &mut DownloadJob) {
        job.progress = job.progress.saturating_add(self.step).min(100);
    }
}
