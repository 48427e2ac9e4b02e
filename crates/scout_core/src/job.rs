use std::fmt;

use serde_json::Value;

/// Identifier the job service assigns to an accepted search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Search criteria as built by the filter form. Opaque to the core.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria(Value);

impl SearchCriteria {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SearchCriteria {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Non-terminal phases of the active job. Terminal states never get stored;
/// the job is dropped from the session as soon as one is seen.
#[derive(Debug, Clone, PartialEq)]
pub enum JobPhase {
    /// Submission sent, no task id yet.
    Submitting,
    Pending,
    Started,
    Progress {
        completed: f64,
        total: f64,
        step: String,
    },
    Retry,
    /// State label the client does not know about.
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    task_id: Option<TaskId>,
    criteria: SearchCriteria,
    phase: JobPhase,
}

impl Job {
    pub(crate) fn submitting(criteria: SearchCriteria) -> Self {
        Self {
            task_id: None,
            criteria,
            phase: JobPhase::Submitting,
        }
    }

    pub fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn phase(&self) -> &JobPhase {
        &self.phase
    }

    /// Records the service-assigned id. Returns false if one was already set.
    pub(crate) fn assign_task_id(&mut self, task_id: TaskId) -> bool {
        if self.task_id.is_some() {
            return false;
        }
        self.task_id = Some(task_id);
        self.phase = JobPhase::Pending;
        true
    }

    pub(crate) fn set_phase(&mut self, phase: JobPhase) {
        self.phase = phase;
    }
}
