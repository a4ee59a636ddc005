//! Worker is an execution slot bound to the processing function shared by the whole pool.
//! During a run each worker is owned by exactly one execution loop, so its state needs no
//! locking. A worker is busy exactly while it holds a job.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::{errors::JobError, job::Job, utils::panic_message};

/// The caller-supplied processing function, shared read-only by every worker in a pool.
pub type ProcessFn = Arc<dyn Fn(&Job) -> Result<(), JobError> + Send + Sync>;

pub struct Worker {
    id: usize,
    current_job: Option<Job>,
    process_fn: ProcessFn,
}

impl Worker {
    pub fn new(id: usize, process_fn: ProcessFn) -> Self {
        Self {
            id,
            current_job: None,
            process_fn,
        }
    }

    /// Builds `count` workers with dense ids starting at 0, all sharing `process_fn`.
    pub fn pool(process_fn: ProcessFn, count: usize) -> Vec<Worker> {
        (0..count)
            .map(|id| Worker::new(id, process_fn.clone()))
            .collect()
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.current_job.as_ref()
    }

    /// Binds a job to this worker. The orchestrator only assigns to idle workers.
    pub fn assign(&mut self, job: Job) {
        debug_assert!(!self.is_busy(), "worker {} assigned while busy", self.id);
        self.current_job = Some(job);
    }

    /// Clears the current job and hands it back, leaving the worker idle.
    pub fn release(&mut self) -> Option<Job> {
        self.current_job.take()
    }

    pub fn is_busy(&self) -> bool {
        self.current_job.is_some()
    }

    /// Runs the processing function on the assigned job. Errors returned by the function
    /// pass through untouched; a panic is caught and reported as `JobError::Panicked`.
    pub fn execute(&self) -> Result<(), JobError> {
        let job = self.current_job
            .as_ref()
            .ok_or(JobError::NoJobAssigned { worker_id: self.id })?;

        match catch_unwind(AssertUnwindSafe(|| (self.process_fn)(job))) {
            Ok(result) => result,
            Err(payload) => Err(JobError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("current_job", &self.current_job)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_name() -> ProcessFn {
        Arc::new(|job: &Job| -> Result<(), JobError> {
            job.get_payload("name")?;
            Ok(())
        })
    }

    fn fifth_worker() -> Worker {
        Worker::pool(read_name(), 5).pop().unwrap()
    }

    #[test]
    fn pool_ids_are_dense() {
        let workers = Worker::pool(read_name(), 3);
        assert_eq!(workers.len(), 3);
        assert_eq!(workers.iter().map(Worker::id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn id_is_stable() {
        assert_eq!(fifth_worker().id(), 4);
    }

    #[test]
    fn assign_and_release() {
        let mut worker = fifth_worker();
        assert!(!worker.is_busy());

        worker.assign(Job::new(10));
        assert!(worker.is_busy());
        assert_eq!(worker.current_job().map(|job| job.id), Some(10));

        let released = worker.release();
        assert_eq!(released.map(|job| job.id), Some(10));
        assert!(!worker.is_busy());
        assert!(worker.current_job().is_none());
    }

    #[test]
    fn execute_success() {
        let mut worker = fifth_worker();
        worker.assign(Job::new(10).with_value("name", json!("HTTP Request")));
        assert!(worker.execute().is_ok());
    }

    #[test]
    fn execute_failure_passes_through() {
        let mut worker = fifth_worker();
        worker.assign(Job::new(10));
        assert!(worker.execute().unwrap_err().is_payload_not_found());
        // still busy until released
        assert!(worker.is_busy());
    }

    #[test]
    fn execute_without_job() {
        let worker = fifth_worker();
        assert!(matches!(worker.execute(), Err(JobError::NoJobAssigned { worker_id: 4 })));
    }

    #[test]
    fn execute_catches_panics() {
        let mut worker = Worker::new(0, Arc::new(|_: &Job| -> Result<(), JobError> { panic!("bad job") }));
        worker.assign(Job::new(1));
        match worker.execute() {
            Err(JobError::Panicked(msg)) => assert_eq!(msg, "bad job"),
            other => panic!("expected a panic error, got {:?}", other),
        }
    }
}
