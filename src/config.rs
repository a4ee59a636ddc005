//! OrchestratorConfig captures how many workers a pool runs and how much queue space it
//! reserves up front. Values are adjusted the same way the `threads` setters of the
//! parallel loops are: out-of-range requests are clamped rather than refused, with the
//! single exception of a pool that would end up with no workers at all.

use crate::errors::OrchestratorError;

pub const DEFAULT_WORKER_COUNT:usize = 10;
pub const MAX_WORKER_COUNT:usize = 255;
pub const DEFAULT_QUEUE_CAPACITY:usize = 1024;
pub const MAX_JOB_QUEUE_SIZE:usize = 32767;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub worker_count: usize,
    pub max_workers: usize,
    pub queue_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            worker_count: 0,
            max_workers: MAX_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl OrchestratorConfig {
    pub fn new(worker_count: usize) -> Self {
        Self::default().workers(worker_count)
    }

    /// Requested number of workers. 0 selects `DEFAULT_WORKER_COUNT`.
    pub fn workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Upper bound for the worker count, itself capped at `MAX_WORKER_COUNT`.
    pub fn max_workers(mut self, limit: usize) -> Self {
        self.max_workers = usize::min(limit, MAX_WORKER_COUNT);
        self
    }

    /// Number of queue slots reserved up front. This is an allocation hint: enqueueing
    /// beyond it is allowed.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = usize::min(capacity, MAX_JOB_QUEUE_SIZE);
        self
    }

    pub fn resolve_worker_count(&self) -> Result<usize, OrchestratorError> {
        let requested = if self.worker_count == 0 {
            DEFAULT_WORKER_COUNT
        } else {
            self.worker_count
        };

        // the fields are public, so the limit is capped here as well as in the setter
        let max = usize::min(self.max_workers, MAX_WORKER_COUNT);
        let resolved = usize::min(requested, max);
        if resolved == 0 {
            return Err(OrchestratorError::InvalidWorkerCount { requested, max });
        }
        if resolved < requested {
            tracing::warn!(requested, max, "worker count clamped");
        }
        Ok(resolved)
    }
}
