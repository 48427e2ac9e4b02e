use crate::{RefreshSignal, SearchCriteria, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send the criteria to the job service.
    SubmitJob { criteria: SearchCriteria },
    /// Begin polling the status of an accepted job.
    StartPolling { task_id: TaskId },
    StopPolling,
    /// Tell downstream views that credits and saved results changed.
    RefreshResults(RefreshSignal),
}
