//! Reminder delivery.

use log::info;

use crate::{error::Result, models::Reminder};

/// Delivers reminders to their recipients.
///
/// Implementations must be shareable across threads because the tracker runs
/// scans on the blocking pool.
pub trait Notifier: Send + Sync {
    /// Deliver one reminder. An error is recorded against the reminder's
    /// action and stops further delivery for that action only.
    fn send(&self, reminder: &Reminder) -> Result<()>;
}

/// Notifier that writes reminders to the log instead of sending e-mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, reminder: &Reminder) -> Result<()> {
        info!(
            "Reminder for action {} to {}: '{}' {} {}",
            reminder.action_id,
            reminder.recipient,
            reminder.step_name.as_str(),
            if reminder.overdue { "was due" } else { "is due" },
            reminder.due_date
        );
        Ok(())
    }
}
