//! Due-date scanner.
//!
//! One pass over a list of actions: for each action the step plan is
//! recomputed from the workflow rules, the steps still outstanding for the
//! action's status are compared against the evaluation date, and a
//! [`Reminder`] is produced for every step whose threshold has been crossed.
//!
//! A step's threshold is its due date minus the configured lead days, so
//! with the default lead of zero a step is reported from the day it falls
//! due. Which steps are outstanding depends on the status:
//!
//! | Status | Outstanding steps |
//! |---|---|
//! | Borrador, Pendiente Análisis | impact analysis, cause analysis, action plan |
//! | Pendiente Comprobación | implementation verification |
//! | Pendiente de Cierre | closure |
//! | any but Finalizada | safety committee verification |
//!
//! Each action is evaluated inside its own failure boundary. A failure is
//! recorded in [`ScanSummary::errors`] and the scan moves on; nothing is
//! retried within a pass.

use log::{debug, warn};

use crate::{
    dates::CalendarDate,
    error::Result,
    models::{ActionStatus, ImprovementAction, Reminder, ScanSummary, StepName},
    params::PlanWorkflow,
    workflow,
};

mod notifier;


pub use notifier::{LogNotifier, Notifier};

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Report steps this many days before they fall due
    pub reminder_lead_days: i32,
}

/// Whether `step` still needs work while the action is in `status`.
pub fn is_outstanding(step: StepName, status: ActionStatus) -> bool {
    use ActionStatus::*;

    match step {
        StepName::RegulatoryImpactAnalysis | StepName::CauseAnalysis | StepName::ActionPlan => {
            matches!(status, Borrador | PendienteAnalisis)
        }
        StepName::ImplementationVerification => status == PendienteComprobacion,
        StepName::ActionClosure => status == PendienteCierre,
        StepName::SafetyCommitteeVerification => status.is_open(),
    }
}

/// Single-pass due-date scanner.
pub struct DueDateScanner<'a> {
    notifier: &'a dyn Notifier,
    config: ScanConfig,
}

impl<'a> DueDateScanner<'a> {
    pub fn new(notifier: &'a dyn Notifier, config: ScanConfig) -> Self {
        Self { notifier, config }
    }

    /// Reminders due for one action as of `today`.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` when the action's creation date
    /// cannot be parsed.
    pub fn due_reminders(
        &self,
        action: &ImprovementAction,
        today: CalendarDate,
    ) -> Result<Vec<Reminder>> {
        if !action.status.is_open() {
            return Ok(Vec::new());
        }

        let steps = workflow::plan_steps(&PlanWorkflow::from(action))?;
        let mut reminders = Vec::new();
        for step in steps {
            if !is_outstanding(step.step_name, action.status) {
                continue;
            }
            let threshold = step.due_date.minus_days(self.config.reminder_lead_days)?;
            if today >= threshold {
                reminders.push(Reminder {
                    recipient: step.responsible_party,
                    action_id: action.id,
                    step_name: step.step_name,
                    due_date: step.due_date,
                    overdue: today > step.due_date,
                });
            }
        }
        Ok(reminders)
    }

    /// Evaluates every action and, unless `dry_run`, delivers the reminders.
    ///
    /// Always returns a summary; per-action failures end up in
    /// `errors` as `"action {id}: {message}"`.
    pub fn scan(
        &self,
        actions: &[ImprovementAction],
        today: CalendarDate,
        dry_run: bool,
    ) -> ScanSummary {
        let mut summary = ScanSummary {
            dry_run,
            ..Default::default()
        };

        for action in actions {
            summary.checked_actions += 1;

            let reminders = match self.due_reminders(action, today) {
                Ok(reminders) => reminders,
                Err(e) => {
                    warn!("Skipping action {}: {e}", action.id);
                    summary.errors.push(format!("action {}: {e}", action.id));
                    continue;
                }
            };

            if dry_run {
                debug!(
                    "Dry run: {} reminder(s) for action {}",
                    reminders.len(),
                    action.id
                );
                summary.sent_emails.extend(reminders);
                continue;
            }

            for reminder in reminders {
                if let Err(e) = self.notifier.send(&reminder) {
                    warn!("Delivery failed for action {}: {e}", action.id);
                    summary.errors.push(format!("action {}: {e}", action.id));
                    break;
                }
                summary.sent_emails.push(reminder);
            }
        }

        summary
    }
}
