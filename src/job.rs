use std::collections::HashMap;

use serde_json::Value;

use crate::{context::Context, errors::JobError};

/// A unit of work handed to exactly one worker. The id is chosen by the caller and
/// copied verbatim into the matching `WorkerResult`; it does not have to be unique.
/// ```
/// use parallel_jobs::prelude::*;
///
/// let job = Job::new(1).with_value("name", "report.csv");
/// assert_eq!(job.get_payload("name").unwrap(), "report.csv");
/// assert!(job.get_payload("missing").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Job {
    pub id: i64,
    pub context: Option<Context>,
    pub payload: HashMap<String, Value>,
}

impl Job {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_payload(mut self, payload: HashMap<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_value<K, V>(mut self, key: K, value: V) -> Self
    where K: Into<String>,
    V: Into<Value>
    {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn get_payload(&self, key: &str) -> Result<&Value, JobError> {
        self.payload
            .get(key)
            .ok_or_else(|| JobError::PayloadNotFound { key: key.to_owned() })
    }
}
