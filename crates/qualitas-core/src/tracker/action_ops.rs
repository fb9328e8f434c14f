//! Action operations for the Tracker.

use jiff::Timestamp;
use log::info;

use super::Tracker;
use crate::{
    dates::CalendarDate,
    error::{Result, TrackerError},
    models::{ActionFilter, ActionStatus, ImprovementAction, Stage, StageRecord},
    params::{CreateAction, DeleteAction, Id, ListActions, RecordStage},
};

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::validation(field).with_reason("must not be empty"));
    }
    Ok(())
}

impl Tracker {
    /// Opens a new action in draft status.
    ///
    /// The creation date defaults to today when not given.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` for empty required fields or an
    /// unparsable creation date.
    pub async fn create_action(&self, params: &CreateAction) -> Result<ImprovementAction> {
        require_text("title", &params.title)?;
        require_text("action_type", &params.action_type)?;
        require_text("category", &params.category)?;
        require_text("responsible_group_id", &params.responsible_group_id)?;

        let creation_date = match params.creation_date.as_deref() {
            Some(raw) => CalendarDate::parse("creation_date", raw)?,
            None => CalendarDate::today(),
        };

        let params = params.clone();
        let action = self
            .with_database(move |db| db.create_action(&params, creation_date))
            .await?;

        info!(
            "Created action {} ({}, {})",
            action.id, action.action_type, action.category
        );
        Ok(action)
    }

    /// Retrieves an action by its ID.
    pub async fn get_action(&self, params: &Id) -> Result<Option<ImprovementAction>> {
        let id = params.id;
        self.with_database(move |db| db.get_action(id)).await
    }

    /// Lists actions; finalized ones are hidden unless a status is given or
    /// `include_closed` is set.
    pub async fn list_actions(&self, params: &ListActions) -> Result<Vec<ImprovementAction>> {
        let filter = ActionFilter::try_from(params)?;
        self.with_database(move |db| db.list_actions(Some(&filter)))
            .await
    }

    /// Submits a draft for analysis.
    pub async fn submit_action(&self, params: &Id) -> Result<ImprovementAction> {
        self.advance(params.id, ActionStatus::Borrador, None).await
    }

    /// Records the cause analysis and action plan.
    pub async fn record_analysis(&self, params: &RecordStage) -> Result<ImprovementAction> {
        self.record_stage(Stage::Analysis, params).await
    }

    /// Records the verification of the implemented actions.
    pub async fn record_verification(&self, params: &RecordStage) -> Result<ImprovementAction> {
        self.record_stage(Stage::Verification, params).await
    }

    /// Records the closure, finalizing the action.
    pub async fn record_closure(&self, params: &RecordStage) -> Result<ImprovementAction> {
        self.record_stage(Stage::Closure, params).await
    }

    /// Permanently deletes an action and its workflow plans.
    ///
    /// Requires `confirmed`; returns the deleted action.
    pub async fn delete_action(&self, params: &DeleteAction) -> Result<ImprovementAction> {
        if !params.confirmed {
            return Err(TrackerError::validation("confirmed")
                .with_reason("deletion must be explicitly confirmed"));
        }

        let id = params.id;
        let action = self
            .with_database(move |db| {
                let action = db
                    .get_action(id)?
                    .ok_or(TrackerError::ActionNotFound { id })?;
                db.delete_action(id)?;
                Ok(action)
            })
            .await?;

        info!("Deleted action {id}");
        Ok(action)
    }

    async fn record_stage(&self, stage: Stage, params: &RecordStage) -> Result<ImprovementAction> {
        require_text("responsible", &params.responsible)?;

        let record = StageRecord {
            responsible: params.responsible.clone(),
            notes: params.notes.clone(),
            recorded_at: Timestamp::now(),
        };
        self.advance(params.id, stage.required_status(), Some((stage, record)))
            .await
    }

    /// Moves an action one status forward from `from`.
    async fn advance(
        &self,
        id: u64,
        from: ActionStatus,
        stage: Option<(Stage, StageRecord)>,
    ) -> Result<ImprovementAction> {
        let to = from.next().ok_or(TrackerError::InvalidTransition {
            id,
            from,
            to: from,
        })?;

        let action = self
            .with_database(move |db| {
                db.advance_action(id, from, to, stage.as_ref().map(|(s, r)| (*s, r)))
            })
            .await?;

        info!("Action {id} moved from '{from}' to '{to}'");
        Ok(action)
    }
}
