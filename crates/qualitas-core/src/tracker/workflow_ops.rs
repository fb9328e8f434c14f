//! Workflow plan operations for the Tracker.

use log::info;

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    models::WorkflowPlan,
    params::{Id, PlanWorkflow},
    workflow,
};

impl Tracker {
    /// Generates a plan for a stored action and persists it.
    ///
    /// Each call stores a new plan with its own workflow ID; earlier plans
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::ActionNotFound` for unknown IDs and
    /// `TrackerError::Validation` when the stored creation date is malformed.
    pub async fn plan_workflow(&self, params: &Id) -> Result<WorkflowPlan> {
        let id = params.id;
        let (plan, revision) = self
            .with_database(move |db| {
                let action = db
                    .get_action(id)?
                    .ok_or(TrackerError::ActionNotFound { id })?;
                let plan = workflow::plan_workflow(&PlanWorkflow::from(&action))?;
                db.save_workflow(&plan)?;
                let revision = db.count_workflows(id)?;
                Ok((plan, revision))
            })
            .await?;

        info!(
            "Generated workflow {} for action {id} with {} steps (revision {revision})",
            plan.workflow_id,
            plan.steps.len()
        );
        Ok(plan)
    }

    /// Returns the most recently generated plan for an action.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::ActionNotFound` for unknown IDs and
    /// `TrackerError::WorkflowNotFound` when no plan was generated yet.
    pub async fn show_workflow(&self, params: &Id) -> Result<WorkflowPlan> {
        let id = params.id;
        self.with_database(move |db| {
            if db.get_action(id)?.is_none() {
                return Err(TrackerError::ActionNotFound { id });
            }
            db.latest_workflow(id)?
                .ok_or(TrackerError::WorkflowNotFound { action_id: id })
        })
        .await
    }

    /// Plans ad-hoc input without touching the database.
    pub fn preview_workflow(&self, params: &PlanWorkflow) -> Result<WorkflowPlan> {
        workflow::plan_workflow(params)
    }
}
