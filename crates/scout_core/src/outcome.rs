use crate::SearchOutcome;

/// Why a submission did not start a job.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// A job is already active in this session. Decided locally.
    AlreadyRunning,
    /// The service answered 402.
    InsufficientCredits { message: String },
    /// Any other refusal, malformed acceptance or transport error.
    Failed { message: String },
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::AlreadyRunning => "A search is already in progress.".to_string(),
            Rejection::InsufficientCredits { message } => {
                format!("Insufficient credits: {message}")
            }
            Rejection::Failed { message } => format!("Could not start search: {message}"),
        }
    }
}

/// How a tracked job ended, from this client's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum JobConclusion {
    Completed(SearchOutcome),
    /// Service reported success but the result could not be used.
    UnexpectedResult,
    /// Service reported failure; message is passed through verbatim.
    Failed(String),
    /// A status query failed; the job may still be running server-side.
    MonitoringInterrupted(String),
    /// Gave up after the configured wait limit.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// User-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}
