//! Adding this module as parallel_jobs::prelude::* gives access to the desired
//! functionalities.
//!

pub use crate::{
    config::OrchestratorConfig,
    context::Context,
    errors::{BoxError, JobError, OrchestratorError},
    for_each::{for_each, ParallelForEach, ParallelForEachExt},
    job::Job,
    orchestrator::{Orchestrator, WorkerResult},
    worker::{ProcessFn, Worker},
};
