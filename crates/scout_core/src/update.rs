use crate::progress::describe;
use crate::{
    reconcile, Effect, JobConclusion, JobSession, Msg, Notice, NoticeLevel, ProgressView,
    Rejection, TaskStatus,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: JobSession, msg: Msg) -> (JobSession, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchRequested(criteria) => {
            // One job per session; checked before anything reaches the network.
            if state.is_busy() {
                state.set_notice(Notice::new(
                    NoticeLevel::Warning,
                    Rejection::AlreadyRunning.message(),
                ));
                return (state, Vec::new());
            }
            state.begin_submission(criteria.clone());
            state.set_notice(Notice::new(
                NoticeLevel::Info,
                "Initiating search, checking credits...",
            ));
            vec![Effect::SubmitJob { criteria }]
        }
        Msg::SubmissionAccepted { task_id } => {
            let assigned = state.is_submitting()
                && state
                    .active_job_mut()
                    .is_some_and(|job| job.assign_task_id(task_id.clone()));
            if !assigned {
                return (state, Vec::new());
            }
            state.set_progress(ProgressView::new(
                "Task started... waiting for progress...",
                0,
            ));
            state.set_notice(Notice::new(
                NoticeLevel::Info,
                "Search started. Monitoring progress...",
            ));
            vec![Effect::StartPolling { task_id }]
        }
        Msg::SubmissionRejected(rejection) => {
            if state.is_submitting() {
                state.clear_active();
            }
            state.set_notice(Notice::new(NoticeLevel::Error, rejection.message()));
            Vec::new()
        }
        Msg::StatusReceived { task_id, status } => {
            if !state.is_tracking(&task_id) {
                // Late answer for a job that is no longer in the slot.
                return (state, Vec::new());
            }
            apply_status(&mut state, status)
        }
        Msg::MonitoringFailed { task_id, message } => {
            if !state.is_tracking(&task_id) {
                return (state, Vec::new());
            }
            let last = state.progress().percentage;
            state.set_progress(ProgressView::new("Status tracking interrupted", last));
            state.set_notice(Notice::new(
                NoticeLevel::Error,
                format!("Error checking search status, stopped monitoring: {message}"),
            ));
            state.conclude(JobConclusion::MonitoringInterrupted(message));
            vec![Effect::StopPolling]
        }
        Msg::WaitLimitExceeded { task_id } => {
            if !state.is_tracking(&task_id) {
                return (state, Vec::new());
            }
            let last = state.progress().percentage;
            state.set_progress(ProgressView::new("Stopped waiting for the search", last));
            state.set_notice(Notice::new(
                NoticeLevel::Warning,
                "The search is taking too long; stopped waiting for it to finish.",
            ));
            state.conclude(JobConclusion::TimedOut);
            vec![Effect::StopPolling]
        }
        Msg::CreditsSaved(credits) => {
            if credits.is_finite() {
                state.ledger_mut().set_remaining(credits);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_status(state: &mut JobSession, status: TaskStatus) -> Vec<Effect> {
    let view = describe(&status, state.progress().percentage);
    state.set_progress(view);

    if let Some(phase) = status.as_phase() {
        if let Some(job) = state.active_job_mut() {
            if *job.phase() != phase {
                job.set_phase(phase);
                state.mark_dirty();
            }
        }
        return Vec::new();
    }

    match status {
        TaskStatus::Success(Some(outcome)) => match reconcile(state.ledger_mut(), &outcome) {
            Some(signal) => {
                state.set_notice(Notice::new(
                    NoticeLevel::Success,
                    format!(
                        "Search complete! Found {} listings. Cost: {} credits.",
                        outcome.listing_count, outcome.credits_charged
                    ),
                ));
                state.conclude(JobConclusion::Completed(outcome));
                vec![Effect::StopPolling, Effect::RefreshResults(signal)]
            }
            None => conclude_unexpected(state),
        },
        TaskStatus::Success(None) => conclude_unexpected(state),
        TaskStatus::Failure { message } => {
            state.set_notice(Notice::new(
                NoticeLevel::Error,
                format!("Search failed: {message}"),
            ));
            state.conclude(JobConclusion::Failed(message));
            vec![Effect::StopPolling]
        }
        _ => Vec::new(),
    }
}

fn conclude_unexpected(state: &mut JobSession) -> Vec<Effect> {
    state.set_progress(ProgressView::new(
        "Task completed but returned unexpected data",
        100,
    ));
    state.set_notice(Notice::new(
        NoticeLevel::Warning,
        "Task finished with unexpected result.",
    ));
    state.conclude(JobConclusion::UnexpectedResult);
    vec![Effect::StopPolling]
}

