use crate::JobPhase;

/// Decoded status report for one poll. Each variant carries only the fields
/// the service sends for that state.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskStatus {
    Pending,
    Started,
    Progress {
        completed: f64,
        total: f64,
        step: String,
    },
    Retry,
    /// Terminal. `None` when the result payload was missing or malformed.
    Success(Option<SearchOutcome>),
    /// Terminal.
    Failure { message: String },
    Other(String),
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success(_) | TaskStatus::Failure { .. })
    }

    /// Phase to record on the active job, `None` for terminal states.
    pub(crate) fn as_phase(&self) -> Option<JobPhase> {
        match self {
            TaskStatus::Pending => Some(JobPhase::Pending),
            TaskStatus::Started => Some(JobPhase::Started),
            TaskStatus::Progress {
                completed,
                total,
                step,
            } => Some(JobPhase::Progress {
                completed: *completed,
                total: *total,
                step: step.clone(),
            }),
            TaskStatus::Retry => Some(JobPhase::Retry),
            TaskStatus::Other(label) => Some(JobPhase::Other(label.clone())),
            TaskStatus::Success(_) | TaskStatus::Failure { .. } => None,
        }
    }
}

/// What a successful search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub listing_count: u64,
    /// Server-side file holding the listings, if one was written.
    pub storage_location: Option<String>,
    /// Id of the saved result document.
    pub result_id: Option<String>,
    pub credits_charged: f64,
    pub credits_remaining: f64,
}
