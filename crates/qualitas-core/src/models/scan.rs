//! Due-date scan results.

use serde::{Deserialize, Serialize};

use super::StepName;
use crate::dates::CalendarDate;

/// A reminder that a workflow step has reached its due-date threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Responsible party of the step
    pub recipient: String,

    /// Action the step belongs to
    pub action_id: u64,

    /// Step that is due
    pub step_name: StepName,

    /// The step's deadline
    pub due_date: CalendarDate,

    /// True once the deadline has passed, false while it is due today or
    /// inside the reminder lead window
    pub overdue: bool,
}

/// Outcome of one pass of the due-date scanner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Number of actions the scan attempted to evaluate
    pub checked_actions: usize,

    /// Reminders delivered, or that would have been delivered in a dry run
    pub sent_emails: Vec<Reminder>,

    /// One message per action whose evaluation or delivery failed
    pub errors: Vec<String>,

    /// Whether delivery was skipped
    #[serde(default)]
    pub dry_run: bool,
}

impl ScanSummary {
    /// True when no action failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
