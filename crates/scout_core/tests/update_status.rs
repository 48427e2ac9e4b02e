use std::sync::Once;

use pretty_assertions::assert_eq;
use scout_core::{
    update, Effect, JobConclusion, JobPhase, JobSession, Msg, NoticeLevel, RefreshSignal,
    SearchCriteria, SearchOutcome, TaskId, TaskStatus,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn accepted(task_id: &str) -> JobSession {
    let criteria = SearchCriteria::new(json!({ "Make": "Honda" }));
    let (state, _) = update(JobSession::new(), Msg::SearchRequested(criteria));
    let (state, _) = update(
        state,
        Msg::SubmissionAccepted {
            task_id: TaskId::new(task_id),
        },
    );
    state
}

fn status(state: JobSession, task_id: &str, status: TaskStatus) -> (JobSession, Vec<Effect>) {
    update(
        state,
        Msg::StatusReceived {
            task_id: TaskId::new(task_id),
            status,
        },
    )
}

fn outcome(remaining: f64) -> SearchOutcome {
    SearchOutcome {
        listing_count: 12,
        storage_location: Some("results/honda.csv".into()),
        result_id: Some("doc-1".into()),
        credits_charged: 3.0,
        credits_remaining: remaining,
    }
}

#[test]
fn progress_reports_percentage_and_step() {
    init_logging();
    let (state, effects) = status(
        accepted("abc"),
        "abc",
        TaskStatus::Progress {
            completed: 1.0,
            total: 4.0,
            step: "Fetching page 1".into(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.progress.percentage, 25);
    assert!(view.progress.label.contains("Fetching page 1"));
    assert_eq!(
        view.phase,
        Some(JobPhase::Progress {
            completed: 1.0,
            total: 4.0,
            step: "Fetching page 1".into(),
        })
    );
    assert!(view.busy);
}

#[test]
fn non_terminal_states_keep_polling() {
    init_logging();
    let mut state = accepted("abc");
    for next in [
        TaskStatus::Pending,
        TaskStatus::Started,
        TaskStatus::Retry,
        TaskStatus::Other("RECEIVED".into()),
    ] {
        let (after, effects) = status(state, "abc", next);
        assert!(effects.is_empty());
        assert!(after.is_busy());
        state = after;
    }
    assert_eq!(state.view().progress.label, "Task state: RECEIVED");
}

#[test]
fn retry_keeps_last_percentage() {
    init_logging();
    let (state, _) = status(
        accepted("abc"),
        "abc",
        TaskStatus::Progress {
            completed: 40.0,
            total: 200.0,
            step: "Fetching page 2".into(),
        },
    );
    let (state, _) = status(state, "abc", TaskStatus::Retry);

    let view = state.view();
    assert_eq!(view.progress.label, "Task is retrying...");
    assert_eq!(view.progress.percentage, 20);
    assert_eq!(view.phase, Some(JobPhase::Retry));
}

#[test]
fn success_reconciles_ledger_and_stops_polling() {
    init_logging();
    let (state, _) = update(accepted("abc"), Msg::CreditsSaved(20.0));
    let (state, effects) = status(state, "abc", TaskStatus::Success(Some(outcome(17.0))));

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling,
            Effect::RefreshResults(RefreshSignal {
                result_id: Some("doc-1".into())
            }),
        ]
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.credits_remaining, Some(17.0));
    assert_eq!(
        view.last_conclusion,
        Some(JobConclusion::Completed(outcome(17.0)))
    );
    assert_eq!(view.notice.expect("notice").level, NoticeLevel::Success);
}

#[test]
fn ledger_follows_reported_balance() {
    init_logging();
    let (state, _) = status(
        accepted("abc"),
        "abc",
        TaskStatus::Success(Some(outcome(37.0))),
    );
    assert_eq!(state.ledger().remaining(), Some(37.0));
}

#[test]
fn failure_leaves_ledger_untouched() {
    init_logging();
    let (state, _) = update(accepted("abc"), Msg::CreditsSaved(5.0));
    let before = state.ledger().clone();
    let (state, effects) = status(
        state,
        "abc",
        TaskStatus::Failure {
            message: "scraper crashed".into(),
        },
    );

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.ledger(), &before);
    assert_eq!(
        state.last_conclusion(),
        Some(&JobConclusion::Failed("scraper crashed".into()))
    );
    assert_eq!(
        state.view().notice.expect("notice").text,
        "Search failed: scraper crashed"
    );
    assert!(!state.is_busy());
}

#[test]
fn malformed_success_is_terminal_but_distinct() {
    init_logging();
    let (state, _) = update(accepted("abc"), Msg::CreditsSaved(9.0));
    let (state, effects) = status(state, "abc", TaskStatus::Success(None));

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(
        state.last_conclusion(),
        Some(&JobConclusion::UnexpectedResult)
    );
    assert_eq!(state.ledger().remaining(), Some(9.0));
    assert_eq!(state.view().notice.expect("notice").level, NoticeLevel::Warning);
}

#[test]
fn non_finite_balance_is_not_applied() {
    init_logging();
    let (state, _) = update(accepted("abc"), Msg::CreditsSaved(9.0));
    let (state, effects) = status(
        state,
        "abc",
        TaskStatus::Success(Some(outcome(f64::NAN))),
    );

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.ledger().remaining(), Some(9.0));
    assert_eq!(
        state.last_conclusion(),
        Some(&JobConclusion::UnexpectedResult)
    );
}

#[test]
fn terminal_state_is_sticky() {
    init_logging();
    let (state, _) = status(
        accepted("abc"),
        "abc",
        TaskStatus::Failure {
            message: "boom".into(),
        },
    );
    let (state, effects) = status(state, "abc", TaskStatus::Success(Some(outcome(1.0))));

    assert!(effects.is_empty());
    assert_eq!(state.ledger().remaining(), None);
    assert_eq!(
        state.last_conclusion(),
        Some(&JobConclusion::Failed("boom".into()))
    );
}

#[test]
fn superseded_response_is_discarded() {
    init_logging();
    let state = accepted("new");
    let before = state.clone();
    let (state, effects) = status(state, "old", TaskStatus::Success(Some(outcome(1.0))));

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn monitoring_failure_clears_slot_and_reenables_submit() {
    init_logging();
    let (state, effects) = update(
        accepted("abc"),
        Msg::MonitoringFailed {
            task_id: TaskId::new("abc"),
            message: "http status 500".into(),
        },
    );

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert!(!state.is_busy());
    assert_eq!(
        state.last_conclusion(),
        Some(&JobConclusion::MonitoringInterrupted("http status 500".into()))
    );

    let criteria = SearchCriteria::new(json!({ "Make": "Honda" }));
    let (_, effects) = update(state, Msg::SearchRequested(criteria.clone()));
    assert_eq!(effects, vec![Effect::SubmitJob { criteria }]);
}

#[test]
fn wait_limit_concludes_as_timed_out() {
    init_logging();
    let (state, effects) = update(
        accepted("abc"),
        Msg::WaitLimitExceeded {
            task_id: TaskId::new("abc"),
        },
    );

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.last_conclusion(), Some(&JobConclusion::TimedOut));
    assert!(!state.is_busy());
}
