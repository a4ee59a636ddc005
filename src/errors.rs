use std::error::Error;

use thiserror::Error;

/// Boxed form of any error raised by a caller-supplied processing function.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Outcome of a single job that did not complete successfully. These are recorded
/// per job inside a `WorkerResult` and never abort the run.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("payload not found: {key}")]
    PayloadNotFound { key: String },
    #[error("job cancelled before it started")]
    Cancelled,
    #[error("deadline exceeded before the job started")]
    DeadlineExceeded,
    #[error("worker {worker_id} has no job assigned")]
    NoJobAssigned { worker_id: usize },
    #[error("processing function panicked: {0}")]
    Panicked(String),
    #[error(transparent)]
    Failed(#[from] BoxError),
}

impl JobError {
    /// Wraps an opaque caller error. The pool records it without inspecting it.
    pub fn failed<E>(err: E) -> Self
    where E: Into<BoxError>
    {
        JobError::Failed(err.into())
    }

    pub fn is_payload_not_found(&self) -> bool {
        matches!(self, JobError::PayloadNotFound { .. })
    }

    /// True for the two variants produced by a context check rather than by the job itself.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, JobError::Cancelled | JobError::DeadlineExceeded)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("invalid worker count: requested {requested}, maximum {max}")]
    InvalidWorkerCount { requested: usize, max: usize },
}
