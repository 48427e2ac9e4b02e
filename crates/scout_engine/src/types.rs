use scout_core::Rejection;
use thiserror::Error;

/// Why the job service did not accept a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("insufficient credits: {0}")]
    InsufficientCredits(String),
    #[error("submission refused with http status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed submission response: {0}")]
    MalformedResponse(String),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    /// Classifies the error for the session state machine.
    pub fn into_rejection(self) -> Rejection {
        match self {
            SubmitError::InsufficientCredits(message) => {
                Rejection::InsufficientCredits { message }
            }
            SubmitError::Rejected { message, .. } => Rejection::Failed { message },
            SubmitError::MalformedResponse(_) => Rejection::Failed {
                message: "the service returned an unexpected response".to_string(),
            },
            SubmitError::Timeout => Rejection::Failed {
                message: "the service did not answer in time".to_string(),
            },
            SubmitError::Network(_) => Rejection::Failed {
                message: "network or server error".to_string(),
            },
        }
    }
}

/// A status query that could not produce a task state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("undecodable status response: {0}")]
    Decode(String),
}

/// The job service client could not be set up.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("could not build http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
