use std::sync::Arc;

use scout_core::{
    update, AppViewModel, Effect, Job, JobConclusion, JobSession, Msg, RefreshSignal, Rejection,
    SearchCriteria, TaskId,
};
use scout_logging::{scout_debug, scout_info, scout_warn};
use tokio::sync::{broadcast, mpsc};

use crate::api::JobApi;
use crate::poller::PollScheduler;
use crate::settings::PollSettings;

const REFRESH_CAPACITY: usize = 16;

/// Runs search jobs for one session.
///
/// The controller is the only owner of the [`JobSession`] and the poll loop.
/// Every state change goes through [`scout_core::update`]; this type executes
/// the resulting effects.
pub struct SearchController {
    state: JobSession,
    api: Arc<dyn JobApi>,
    poller: PollScheduler,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    refresh_tx: broadcast::Sender<RefreshSignal>,
}

impl SearchController {
    pub fn new(api: Arc<dyn JobApi>, poll: PollSettings) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (refresh_tx, _) = broadcast::channel(REFRESH_CAPACITY);
        Self {
            state: JobSession::new(),
            api,
            poller: PollScheduler::new(poll),
            msg_tx,
            msg_rx,
            refresh_tx,
        }
    }

    /// Receiver for the signal sent after each successful search.
    pub fn subscribe_refresh(&self) -> broadcast::Receiver<RefreshSignal> {
        self.refresh_tx.subscribe()
    }

    pub fn session(&self) -> &JobSession {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Stores a balance coming from the settings flow.
    pub fn save_credits(&mut self, credits: f64) {
        self.handle(Msg::CreditsSaved(credits));
    }

    /// Submits a search. Refuses without touching the network while another
    /// job is active; on acceptance polling starts in the background.
    pub async fn submit(&mut self, criteria: SearchCriteria) -> Result<TaskId, Rejection> {
        let Some(criteria) = self.handle(Msg::SearchRequested(criteria)) else {
            scout_debug!("Search requested while a job is active");
            return Err(Rejection::AlreadyRunning);
        };

        match self.api.submit(&criteria).await {
            Ok(task_id) => {
                self.handle(Msg::SubmissionAccepted {
                    task_id: task_id.clone(),
                });
                Ok(task_id)
            }
            Err(err) => {
                scout_warn!("Search submission failed: {}", err);
                let rejection = err.into_rejection();
                self.handle(Msg::SubmissionRejected(rejection.clone()));
                Err(rejection)
            }
        }
    }

    /// Waits for the next poll result that changes what the user sees and
    /// returns the new view. Returns `None` once no job is active.
    pub async fn next_update(&mut self) -> Option<AppViewModel> {
        while self.state.is_busy() {
            let msg = self.msg_rx.recv().await?;
            self.handle(msg);
            if self.state.consume_dirty() {
                return Some(self.state.view());
            }
        }
        None
    }

    /// Drives polling until the active job ends and returns how it ended.
    pub async fn wait_for_conclusion(&mut self) -> Option<JobConclusion> {
        while self.next_update().await.is_some() {}
        self.state.last_conclusion().cloned()
    }

    /// Runs one message through `update` and executes the effects. Log lines
    /// are tagged with the job the message concerns. Synchronous, so the
    /// thread-local tag never outlives an await point.
    fn handle(&mut self, msg: Msg) -> Option<SearchCriteria> {
        let task_id = msg
            .task_id()
            .or_else(|| self.state.active_job().and_then(Job::task_id))
            .cloned();
        let _scope = task_id
            .as_ref()
            .map(|task_id| scout_logging::enter_task(task_id.as_str()));

        if matches!(msg, Msg::SubmissionAccepted { .. }) {
            scout_info!("Search accepted");
        }
        let was_busy = self.state.is_busy();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if was_busy && !self.state.is_busy() && task_id.is_some() {
            if let Some(conclusion) = self.state.last_conclusion() {
                scout_info!("Search finished: {:?}", conclusion);
            }
        }
        self.run_effects(effects)
    }

    /// Executes effects; hands back the criteria of a submission to send.
    fn run_effects(&mut self, effects: Vec<Effect>) -> Option<SearchCriteria> {
        let mut submission = None;
        for effect in effects {
            match effect {
                Effect::SubmitJob { criteria } => submission = Some(criteria),
                Effect::StartPolling { task_id } => {
                    self.poller
                        .start(task_id, self.api.clone(), self.msg_tx.clone());
                }
                Effect::StopPolling => self.poller.stop(),
                Effect::RefreshResults(signal) => {
                    scout_debug!("Refresh signal for result {:?}", signal.result_id);
                    // No subscribers is fine.
                    let _ = self.refresh_tx.send(signal);
                }
            }
        }
        submission
    }
}
