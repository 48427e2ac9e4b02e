use std::sync::Arc;

use scout_core::{Msg, TaskId};
use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::JobApi;
use crate::settings::PollSettings;

struct ActivePoll {
    task_id: TaskId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the single status-polling loop of a session.
///
/// Each loop issues one query per tick and waits for its answer before the
/// next tick, so queries never overlap. Results go back as [`Msg`]s.
pub struct PollScheduler {
    settings: PollSettings,
    active: Option<ActivePoll>,
}

impl PollScheduler {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            settings,
            active: None,
        }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Starts polling `task_id`, cancelling any loop already running.
    pub fn start(&mut self, task_id: TaskId, api: Arc<dyn JobApi>, tx: UnboundedSender<Msg>) {
        self.stop();
        scout_info!("Polling task {} every {:?}", task_id, self.settings.interval);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            task_id.clone(),
            api,
            tx,
            self.settings.clone(),
            cancel.clone(),
        ));
        self.active = Some(ActivePoll {
            task_id,
            cancel,
            handle,
        });
    }

    /// Cancels the running loop, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            scout_debug!("Stopping poll loop for task {}", active.task_id);
            active.cancel.cancel();
        }
    }

    /// True while a loop is registered and has not exited on its own.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    pub fn active_task(&self) -> Option<&TaskId> {
        self.active.as_ref().map(|active| &active.task_id)
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

const UNEXPECTED_EXIT: &str = "status polling stopped unexpectedly";

/// Sender half of a poll loop. If the loop unwinds, e.g. because the status
/// query panicked, the drop sends a monitoring failure so the controller does
/// not wait on a loop that is gone.
struct ExitReporter {
    task_id: TaskId,
    tx: UnboundedSender<Msg>,
}

impl ExitReporter {
    fn send(&self, msg: Msg) -> bool {
        self.tx.send(msg).is_ok()
    }
}

impl Drop for ExitReporter {
    fn drop(&mut self) {
        if std::thread::panicking() {
            scout_error!("Poll loop for task {} ended abnormally", self.task_id);
            let _ = self.tx.send(Msg::MonitoringFailed {
                task_id: self.task_id.clone(),
                message: UNEXPECTED_EXIT.to_string(),
            });
        }
    }
}

async fn poll_loop(
    task_id: TaskId,
    api: Arc<dyn JobApi>,
    tx: UnboundedSender<Msg>,
    settings: PollSettings,
    cancel: CancellationToken,
) {
    let reporter = ExitReporter {
        task_id: task_id.clone(),
        tx,
    };
    let started = Instant::now();
    let mut ticker = tokio::time::interval(settings.interval);
    // A slow answer pushes the next query back instead of bunching ticks up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first query waits one period.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if let Some(limit) = settings.max_wait {
            if started.elapsed() >= limit {
                scout_warn!("Task {} still running after {:?}, giving up", task_id, limit);
                reporter.send(Msg::WaitLimitExceeded {
                    task_id: task_id.clone(),
                });
                break;
            }
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.status(&task_id) => result,
        };
        if cancel.is_cancelled() {
            break;
        }

        let (msg, finished) = match result {
            Ok(status) => {
                let terminal = status.is_terminal();
                (
                    Msg::StatusReceived {
                        task_id: task_id.clone(),
                        status,
                    },
                    terminal,
                )
            }
            Err(err) => {
                scout_warn!("Status check for task {} failed: {}", task_id, err);
                (
                    Msg::MonitoringFailed {
                        task_id: task_id.clone(),
                        message: err.to_string(),
                    },
                    true,
                )
            }
        };

        if !reporter.send(msg) || finished {
            break;
        }
    }
    scout_debug!("Poll loop for task {} exited", task_id);
}
