//! Due-date scan operations for the Tracker.

use log::{error, log, Level};
use tokio::task;

use super::Tracker;
use crate::{
    dates::CalendarDate,
    error::{Result, TrackerError},
    models::{ActionFilter, ScanSummary},
    params::ScanDueDates,
    scanner::DueDateScanner,
};

impl Tracker {
    /// Runs one due-date scan over every open action.
    ///
    /// Per-action failures are reported inside the summary. The call only
    /// fails when the actions cannot be loaded, in which case no summary is
    /// produced.
    pub async fn scan_due_dates(&self, params: &ScanDueDates) -> Result<ScanSummary> {
        let today = match params.as_of.as_deref() {
            Some(raw) => CalendarDate::parse("as_of", raw)?,
            None => CalendarDate::today(),
        };
        let dry_run = params.dry_run;
        let mut config = self.scan_config;
        if let Some(days) = params.lead_days {
            if days < 0 {
                return Err(TrackerError::validation("lead_days")
                    .with_reason(format!("must not be negative, got {days}")));
            }
            config.reminder_lead_days = days;
        }

        let actions = self
            .with_database(|db| db.list_actions(Some(&ActionFilter::open())))
            .await
            .inspect_err(|e| error!("Due-date scan aborted, could not load actions: {e}"))?;

        let notifier = self.notifier.clone();
        let summary = task::spawn_blocking(move || {
            DueDateScanner::new(notifier.as_ref(), config).scan(&actions, today, dry_run)
        })
        .await
        .map_err(TrackerError::join)?;

        let level = if summary.is_clean() { Level::Info } else { Level::Warn };
        log!(
            level,
            "Due-date scan as of {today}{}: {} action(s) checked, {} reminder(s), {} error(s)",
            if dry_run { " (dry run)" } else { "" },
            summary.checked_actions,
            summary.sent_emails.len(),
            summary.errors.len()
        );
        Ok(summary)
    }
}
