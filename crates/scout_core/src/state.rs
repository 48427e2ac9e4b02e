use crate::view_model::AppViewModel;
use crate::{CreditLedger, Job, JobConclusion, Notice, ProgressView, SearchCriteria, TaskId};

/// Everything one user session knows about search jobs: the single active
/// job slot, the credit ledger and what to show about them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobSession {
    active: Option<Job>,
    ledger: CreditLedger,
    progress: ProgressView,
    last_conclusion: Option<JobConclusion>,
    notice: Option<Notice>,
    dirty: bool,
}

impl JobSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            busy: self.is_busy(),
            task_id: self.active.as_ref().and_then(|job| job.task_id().cloned()),
            phase: self.active.as_ref().map(|job| job.phase().clone()),
            progress: self.progress.clone(),
            credits_remaining: self.ledger.remaining(),
            last_conclusion: self.last_conclusion.clone(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// True while a job occupies the slot, including before it has a task id.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_job(&self) -> Option<&Job> {
        self.active.as_ref()
    }

    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    pub fn last_conclusion(&self) -> Option<&JobConclusion> {
        self.last_conclusion.as_ref()
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True if `task_id` belongs to the job currently in the slot.
    pub(crate) fn is_tracking(&self, task_id: &TaskId) -> bool {
        self.active
            .as_ref()
            .and_then(Job::task_id)
            .is_some_and(|active| active == task_id)
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|job| job.task_id().is_none())
    }

    pub(crate) fn begin_submission(&mut self, criteria: SearchCriteria) {
        self.active = Some(Job::submitting(criteria));
        self.progress = ProgressView::new("Initiating search...", 0);
        self.last_conclusion = None;
        self.mark_dirty();
    }

    pub(crate) fn active_job_mut(&mut self) -> Option<&mut Job> {
        self.active.as_mut()
    }

    /// Empties the slot and records how the job ended.
    pub(crate) fn conclude(&mut self, conclusion: JobConclusion) {
        self.active = None;
        self.last_conclusion = Some(conclusion);
        self.mark_dirty();
    }

    /// Empties the slot without a conclusion; used when submission never started a job.
    pub(crate) fn clear_active(&mut self) {
        self.active = None;
        self.progress = ProgressView::default();
        self.mark_dirty();
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut CreditLedger {
        &mut self.ledger
    }

    pub(crate) fn progress(&self) -> &ProgressView {
        &self.progress
    }

    pub(crate) fn set_progress(&mut self, progress: ProgressView) {
        if self.progress != progress {
            self.progress = progress;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
