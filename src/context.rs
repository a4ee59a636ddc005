//! Context is a cooperative cancellation handle that may be attached to a run of the
//! orchestrator or to an individual job. It is checked once before each job starts.
//! Nothing is interrupted mid-execution: a job that already started always runs to
//! completion.

use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use std::time::{Duration, Instant};

use crate::errors::JobError;

/// Clones share the same cancellation flag, so cancelling any clone cancels all of them.
/// ```
/// use parallel_jobs::prelude::*;
///
/// let ctx = Context::background();
/// let handle = ctx.clone();
/// assert!(ctx.check().is_ok());
/// handle.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that never expires on its own.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns the reason this context is done, if it is. Explicit cancellation wins
    /// over an expired deadline.
    pub fn check(&self) -> Result<(), JobError> {
        if self.is_cancelled() {
            Err(JobError::Cancelled)
        } else if self.is_expired() {
            Err(JobError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}
