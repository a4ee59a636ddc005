//! A bounded, in-process worker pool. Jobs are queued on an `Orchestrator` and executed across a
//! fixed number of worker threads when `start` is called. Every job yields exactly one
//! `WorkerResult`, either a success or the error the job produced, and a failing job never stops
//! its siblings. Results come back in completion order rather than submission order.
//!
//! Distribution uses a 'fan out / fan in' approach: the queued jobs are pushed into a bounded
//! channel shared by all worker loops, and outcomes are funnelled back through a second channel
//! to the calling thread. Workers park on the channel when there is nothing left to pull.
//!
//! For plain data parallelism over a slice, `for_each` starts one thread per available CPU and
//! hands out items through an atomic cursor, without any queue or persistent worker.
//!
//! Code sample below:
//!
//! ```
//! use parallel_jobs::prelude::*;
//!
//! let mut orchestrator = Orchestrator::with_workers(4, |job: &Job| -> Result<(), JobError> {
//!     let name = job.get_payload("name")?;
//!     assert!(name.is_string());
//!     Ok(())
//! }).unwrap();
//!
//! for id in 0..10 {
//!     orchestrator.enqueue(Job::new(id).with_value("name", format!("request #{}", id)));
//! }
//!
//! let results = orchestrator.start(&Context::background());
//! assert_eq!(results.len(), 10);
//! assert!(results.iter().all(|r| r.is_ok()));
//!
//! // Print all values using a for_each. This runs concurrently on the slice
//! for_each(&[1, 2, 3], |val| { print!("{} ", val); });
//! ```
//!
pub mod config;
pub mod context;
pub mod errors;
pub mod for_each;
pub mod job;
pub mod orchestrator;
pub mod prelude;
pub mod utils;
pub mod worker;
