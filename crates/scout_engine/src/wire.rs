//! JSON shapes spoken by the job service.

use scout_core::{SearchCriteria, SearchOutcome, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_FAILURE_MESSAGE: &str = "Unknown error occurred during task execution.";
const COMPLETE_STATUS: &str = "Complete";
/// Progress counts are percentages unless the service says otherwise.
const DEFAULT_PROGRESS_TOTAL: f64 = 100.0;

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub payload: &'a Value,
}

impl<'a> SubmitRequest<'a> {
    pub fn new(criteria: &'a SearchCriteria) -> Self {
        Self {
            payload: criteria.as_value(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub state: String,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OutcomePayload {
    status: String,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    doc_id: Option<String>,
    result_count: u64,
    tokens_charged: f64,
    tokens_remaining: f64,
}

impl StatusResponse {
    pub fn into_status(self) -> TaskStatus {
        match self.state.to_ascii_uppercase().as_str() {
            "PENDING" => TaskStatus::Pending,
            "STARTED" => TaskStatus::Started,
            "PROGRESS" => TaskStatus::Progress {
                completed: self.progress.unwrap_or(0.0),
                total: self.total.unwrap_or(DEFAULT_PROGRESS_TOTAL),
                step: self.step.unwrap_or_default(),
            },
            "RETRY" => TaskStatus::Retry,
            "SUCCESS" => TaskStatus::Success(self.result.and_then(decode_outcome)),
            "FAILURE" => TaskStatus::Failure {
                message: self
                    .error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            },
            _ => TaskStatus::Other(self.state),
        }
    }
}

/// Validates a success payload. Anything short of a complete, well-typed
/// result yields `None`.
fn decode_outcome(value: Value) -> Option<SearchOutcome> {
    let payload: OutcomePayload = serde_json::from_value(value).ok()?;
    if payload.status != COMPLETE_STATUS
        || !payload.tokens_charged.is_finite()
        || !payload.tokens_remaining.is_finite()
    {
        return None;
    }
    Some(SearchOutcome {
        listing_count: payload.result_count,
        storage_location: payload.file_path,
        result_id: payload.doc_id,
        credits_charged: payload.tokens_charged,
        credits_remaining: payload.tokens_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{describe, ProgressView};
    use serde_json::json;

    fn decode(body: Value) -> TaskStatus {
        serde_json::from_value::<StatusResponse>(body)
            .expect("status body")
            .into_status()
    }

    #[test]
    fn progress_fields_default_when_missing() {
        assert_eq!(
            decode(json!({ "state": "PROGRESS" })),
            TaskStatus::Progress {
                completed: 0.0,
                total: 100.0,
                step: String::new(),
            }
        );
    }

    #[test]
    fn missing_total_reads_progress_as_percent() {
        let status = decode(json!({ "state": "PROGRESS", "progress": 40, "step": "Fetching" }));
        assert_eq!(
            describe(&status, 0),
            ProgressView::new("Fetching (40%)", 40)
        );
    }

    #[test]
    fn explicit_zero_total_stays_at_zero() {
        let status = decode(json!({ "state": "PROGRESS", "progress": 40, "total": 0 }));
        assert_eq!(describe(&status, 0).percentage, 0);
    }

    #[test]
    fn success_with_complete_result_decodes_outcome() {
        let status = decode(json!({
            "state": "SUCCESS",
            "result": {
                "status": "Complete",
                "file_path": null,
                "doc_id": "doc-9",
                "result_count": 12,
                "tokens_charged": 0.3,
                "tokens_remaining": 17
            }
        }));
        assert_eq!(
            status,
            TaskStatus::Success(Some(SearchOutcome {
                listing_count: 12,
                storage_location: None,
                result_id: Some("doc-9".into()),
                credits_charged: 0.3,
                credits_remaining: 17.0,
            }))
        );
    }

    #[test]
    fn success_with_bad_result_has_no_outcome() {
        assert_eq!(
            decode(json!({ "state": "SUCCESS" })),
            TaskStatus::Success(None)
        );
        assert_eq!(
            decode(json!({ "state": "SUCCESS", "result": { "status": "Partial" } })),
            TaskStatus::Success(None)
        );
        assert_eq!(
            decode(json!({
                "state": "SUCCESS",
                "result": {
                    "status": "Incomplete",
                    "result_count": 1,
                    "tokens_charged": 1,
                    "tokens_remaining": 1
                }
            })),
            TaskStatus::Success(None)
        );
    }

    #[test]
    fn failure_without_message_gets_default() {
        assert_eq!(
            decode(json!({ "state": "FAILURE" })),
            TaskStatus::Failure {
                message: DEFAULT_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn unknown_and_lowercase_labels() {
        assert_eq!(decode(json!({ "state": "retry" })), TaskStatus::Retry);
        assert_eq!(
            decode(json!({ "state": "REVOKED" })),
            TaskStatus::Other("REVOKED".into())
        );
    }
}
