use crate::{JobConclusion, JobPhase, Notice, ProgressView, TaskId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    /// A job is active; the search button should be disabled.
    pub busy: bool,
    pub task_id: Option<TaskId>,
    pub phase: Option<JobPhase>,
    pub progress: ProgressView,
    pub credits_remaining: Option<f64>,
    pub last_conclusion: Option<JobConclusion>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}
