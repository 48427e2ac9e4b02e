use scout_core::{update, JobSession, Msg};

#[test]
fn update_is_noop() {
    let state = JobSession::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
