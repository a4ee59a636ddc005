//! Orchestrator owns the job queue and a fixed set of workers. A call to `start` drains the
//! queue into a bounded intake channel that every worker loop pulls from, and funnels one
//! `WorkerResult` per job back through a result channel to the calling thread. Workers block
//! on the channel when there is nothing left to pull, so no loop ever spins looking for work.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::{
    config::{OrchestratorConfig, MAX_JOB_QUEUE_SIZE},
    context::Context,
    errors::{JobError, OrchestratorError},
    job::Job,
    worker::{ProcessFn, Worker},
};

/// Outcome of one job. Exactly one is produced for every job drained by `start`.
#[derive(Debug)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub job_id: i64,
    pub error: Option<JobError>,
}

impl WorkerResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// ```
/// use parallel_jobs::prelude::*;
///
/// let mut orchestrator = Orchestrator::with_workers(2, |job: &Job| -> Result<(), JobError> {
///     job.get_payload("name")?;
///     Ok(())
/// }).unwrap();
///
/// orchestrator.enqueue(Job::new(1).with_value("name", "a"));
/// orchestrator.enqueue(Job::new(2));
///
/// let results = orchestrator.start(&Context::background());
/// assert_eq!(results.len(), 2);
/// assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
/// assert_eq!(orchestrator.queue_length(), 0);
/// ```
pub struct Orchestrator {
    queue: Mutex<VecDeque<Job>>,
    queue_capacity: usize,
    workers: Vec<Worker>,
}

impl Orchestrator {
    pub fn new<F>(config: OrchestratorConfig, f: F) -> Result<Self, OrchestratorError>
    where F: Fn(&Job) -> Result<(), JobError> + Send + Sync + 'static
    {
        let worker_count = config.resolve_worker_count()?;
        let process_fn: ProcessFn = Arc::new(f);
        let queue_capacity = usize::min(config.queue_capacity, MAX_JOB_QUEUE_SIZE);

        Ok(Self {
            queue: Mutex::new(VecDeque::with_capacity(queue_capacity)),
            queue_capacity,
            workers: Worker::pool(process_fn, worker_count),
        })
    }

    /// Shorthand for `Orchestrator::new(OrchestratorConfig::new(worker_count), f)`.
    pub fn with_workers<F>(worker_count: usize, f: F) -> Result<Self, OrchestratorError>
    where F: Fn(&Job) -> Result<(), JobError> + Send + Sync + 'static
    {
        Self::new(OrchestratorConfig::new(worker_count), f)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Appends a job to the tail of the queue.
    pub fn enqueue(&self, job: Job) {
        let mut queue = self.lock_queue();
        if queue.len() == self.queue_capacity {
            tracing::debug!(capacity = self.queue_capacity, "job queue grew past its reserved capacity");
        }
        queue.push_back(job);
    }

    pub fn queue_length(&self) -> usize {
        self.lock_queue().len()
    }

    /// Runs every queued job and blocks until all of them have a result. Results come back
    /// in completion order. Job failures are recorded in the matching `WorkerResult` and never
    /// stop the other jobs. `ctx` is checked before each job starts; jobs that are skipped
    /// because of it still get a result carrying `Cancelled` or `DeadlineExceeded`.
    pub fn start(&mut self, ctx: &Context) -> Vec<WorkerResult> {
        let jobs: Vec<Job> = self.lock_queue().drain(..).collect();
        let total = jobs.len();

        let span = tracing::debug_span!("orchestrator_run", jobs = total, workers = self.workers.len());
        let _enter = span.enter();

        if total == 0 {
            return Vec::new();
        }

        let tm = Instant::now();
        let (job_sender, job_receiver) = crossbeam_channel::bounded::<Job>(total);
        let (result_sender, result_receiver) = crossbeam_channel::bounded::<WorkerResult>(total);

        // Worker 0 runs on the calling thread, so the run always has at least one loop
        // even when no extra thread can be spawned.
        let (inline_worker, spawned_workers) = match self.workers.split_first_mut() {
            Some(split) => split,
            None => return Vec::new(),
        };

        std::thread::scope(|s| {
            let mut spawn_failures = 0;
            for worker in spawned_workers.iter_mut() {
                let receiver = job_receiver.clone();
                let sender = result_sender.clone();
                let thread_name = format!("worker-{}", worker.id());

                if let Err(e) = std::thread::Builder::new()
                    .name(thread_name)
                    .spawn_scoped(s, move || Self::task_loop(worker, receiver, sender, ctx))
                {
                    spawn_failures += 1;
                    tracing::error!(error = %e, "failed to spawn worker thread");
                }
            }
            if spawn_failures > 0 {
                tracing::warn!(spawn_failures, "running with fewer worker threads than configured");
            }

            for job in jobs {
                // capacity equals the job count, so this never blocks
                if job_sender.send(job).is_err() {
                    break;
                }
            }
            drop(job_sender);

            Self::task_loop(inline_worker, job_receiver, result_sender, ctx);
        });

        let results = result_receiver.iter().collect::<Vec<_>>();
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        tracing::debug!(
            completed = results.len(),
            failed,
            elapsed_us = tm.elapsed().as_micros() as u64,
            "run finished"
        );
        results
    }

    /// Task loop bound to a single worker for the whole run. It pulls until the intake is
    /// closed and empty, recording one result per job pulled.
    fn task_loop(worker: &mut Worker, jobs: Receiver<Job>, results: Sender<WorkerResult>, ctx: &Context) {
        while let Ok(job) = jobs.recv() {
            let job_id = job.id;

            let error = match Self::ready(ctx, &job) {
                Err(reason) => Some(reason),
                Ok(()) => {
                    worker.assign(job);
                    worker.execute().err()
                }
            };

            match &error {
                Some(err) => tracing::trace!(worker_id = worker.id(), job_id, error = %err, "job failed"),
                None => tracing::trace!(worker_id = worker.id(), job_id, "job completed"),
            }

            let sent = results.send(WorkerResult {
                worker_id: worker.id(),
                job_id,
                error,
            });
            worker.release();

            if sent.is_err() {
                break;
            }
        }
    }

    fn ready(ctx: &Context, job: &Job) -> Result<(), JobError> {
        ctx.check()?;
        match &job.context {
            Some(job_ctx) => job_ctx.check(),
            None => Ok(()),
        }
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("queue_length", &self.queue_length())
            .field("queue_capacity", &self.queue_capacity)
            .field("workers", &self.workers.len())
            .finish()
    }
}
