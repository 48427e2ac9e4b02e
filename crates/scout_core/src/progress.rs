use crate::TaskStatus;

/// Status line and completion bar for the active search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub label: String,
    /// Always within `0..=100`.
    pub percentage: u8,
}

impl ProgressView {
    pub fn new(label: impl Into<String>, percentage: u8) -> Self {
        Self {
            label: label.into(),
            percentage: percentage.min(100),
        }
    }
}

/// `round(completed / total * 100)`, or 0 when `total` is not positive.
pub fn percentage(completed: f64, total: f64) -> u8 {
    if total.is_nan() || total <= 0.0 || !completed.is_finite() {
        return 0;
    }
    (completed / total * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Maps a reported state to the text and bar shown to the user.
/// `last_percentage` is carried over by states that report no progress.
pub fn describe(status: &TaskStatus, last_percentage: u8) -> ProgressView {
    match status {
        TaskStatus::Pending => ProgressView::new("Task is pending...", 0),
        TaskStatus::Started => {
            ProgressView::new("Task started... waiting for progress...", last_percentage)
        }
        TaskStatus::Progress {
            completed,
            total,
            step,
        } => {
            let pct = percentage(*completed, *total);
            let step = if step.trim().is_empty() {
                "Processing..."
            } else {
                step.as_str()
            };
            ProgressView::new(format!("{step} ({pct}%)"), pct)
        }
        TaskStatus::Retry => ProgressView::new("Task is retrying...", last_percentage),
        TaskStatus::Success(_) => ProgressView::new("Search complete", 100),
        TaskStatus::Failure { .. } => ProgressView::new("Search failed", last_percentage),
        TaskStatus::Other(label) => {
            ProgressView::new(format!("Task state: {label}"), last_percentage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_and_guards_zero_total() {
        assert_eq!(percentage(40.0, 200.0), 20);
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(5.0, 0.0), 0);
        assert_eq!(percentage(0.0, 0.0), 0);
        assert_eq!(percentage(9.0, 4.0), 100);
    }

    #[test]
    fn started_keeps_previous_percentage() {
        let view = describe(&TaskStatus::Started, 40);
        assert_eq!(view.percentage, 40);
        assert_eq!(view.label, "Task started... waiting for progress...");
    }

    #[test]
    fn progress_without_step_uses_placeholder() {
        let view = describe(
            &TaskStatus::Progress {
                completed: 1.0,
                total: 2.0,
                step: String::new(),
            },
            0,
        );
        assert_eq!(view.label, "Processing... (50%)");
        assert_eq!(view.percentage, 50);
    }

    #[test]
    fn unknown_state_is_shown_verbatim() {
        let view = describe(&TaskStatus::Other("REVOKED".into()), 10);
        assert_eq!(view.label, "Task state: REVOKED");
        assert_eq!(view.percentage, 10);
    }
}
