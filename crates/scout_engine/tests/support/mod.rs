#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use scout_core::{SearchCriteria, TaskId, TaskStatus};
use scout_engine::{JobApi, StatusError, SubmitError};

/// In-memory job service answering status queries from a script.
pub struct ScriptedApi {
    submit_result: Mutex<Result<TaskId, SubmitError>>,
    script: Mutex<VecDeque<Result<TaskStatus, StatusError>>>,
    delay: Duration,
    panic_when_exhausted: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    submits: AtomicUsize,
    queries: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(task_id: &str, script: Vec<Result<TaskStatus, StatusError>>) -> Self {
        Self {
            submit_result: Mutex::new(Ok(TaskId::new(task_id))),
            script: Mutex::new(script.into()),
            delay: Duration::ZERO,
            panic_when_exhausted: false,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            submits: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Panics on the first query past the end of the script instead of
    /// answering `Pending`.
    pub fn panic_when_exhausted(mut self) -> Self {
        self.panic_when_exhausted = true;
        self
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl JobApi for ScriptedApi {
    async fn submit(&self, _criteria: &SearchCriteria) -> Result<TaskId, SubmitError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.submit_result.lock().unwrap().clone()
    }

    async fn status(&self, _task_id: &TaskId) -> Result<TaskStatus, StatusError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(answer) => answer,
            None if self.panic_when_exhausted => panic!("status script exhausted"),
            None => Ok(TaskStatus::Pending),
        }
    }
}
