//! Scout core: pure search-job state machine and view-model helpers.
mod effect;
mod job;
mod ledger;
mod msg;
mod outcome;
mod progress;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use job::{Job, JobPhase, SearchCriteria, TaskId};
pub use ledger::{reconcile, CreditLedger, RefreshSignal};
pub use msg::Msg;
pub use outcome::{JobConclusion, Notice, NoticeLevel, Rejection};
pub use progress::{describe, percentage, ProgressView};
pub use state::JobSession;
pub use status::{SearchOutcome, TaskStatus};
pub use update::update;
pub use view_model::AppViewModel;
