use crate::{Rejection, SearchCriteria, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked to run a search with these criteria.
    SearchRequested(SearchCriteria),
    /// Job service accepted the submission.
    SubmissionAccepted { task_id: TaskId },
    /// Job service refused the submission, or the call itself failed.
    SubmissionRejected(Rejection),
    /// A status poll returned a decoded task state.
    StatusReceived { task_id: TaskId, status: TaskStatus },
    /// A status poll failed at the transport level.
    MonitoringFailed { task_id: TaskId, message: String },
    /// The configured wait limit elapsed without a terminal state.
    WaitLimitExceeded { task_id: TaskId },
    /// Settings flow stored a new credit balance.
    CreditsSaved(f64),
    /// Fallback for placeholder wiring.
    NoOp,
}

impl Msg {
    /// The job this message is about, if it names one.
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Msg::SubmissionAccepted { task_id }
            | Msg::StatusReceived { task_id, .. }
            | Msg::MonitoringFailed { task_id, .. }
            | Msg::WaitLimitExceeded { task_id } => Some(task_id),
            Msg::SearchRequested(_)
            | Msg::SubmissionRejected(_)
            | Msg::CreditsSaved(_)
            | Msg::NoOp => None,
        }
    }
}
