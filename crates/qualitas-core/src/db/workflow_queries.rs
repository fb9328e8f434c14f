//! Workflow plan persistence.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::invalid_text;
use crate::{
    dates::CalendarDate,
    error::{DatabaseResultExt, Result},
    models::{StepName, StepStatus, WorkflowPlan, WorkflowStep},
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO workflow_plans (workflow_id, action_id, generated_at) VALUES (?1, ?2, ?3)";
const INSERT_STEP_SQL: &str = "INSERT INTO workflow_steps (workflow_id, step_order, step_name, responsible_party, due_date, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_LATEST_PLAN_SQL: &str = "SELECT workflow_id, generated_at FROM workflow_plans WHERE action_id = ?1 ORDER BY rowid DESC LIMIT 1";
const SELECT_STEPS_SQL: &str = "SELECT step_name, responsible_party, due_date, status FROM workflow_steps WHERE workflow_id = ?1 ORDER BY step_order ASC";
const COUNT_PLANS_SQL: &str = "SELECT COUNT(*) FROM workflow_plans WHERE action_id = ?1";

impl super::Database {
    /// Stores a generated plan and its steps, preserving step order.
    pub fn save_workflow(&mut self, plan: &WorkflowPlan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.workflow_id,
                plan.action_id as i64,
                plan.generated_at.to_string()
            ],
        )
        .db_context("Failed to insert workflow plan")?;

        for (order, step) in plan.steps.iter().enumerate() {
            tx.execute(
                INSERT_STEP_SQL,
                params![
                    plan.workflow_id,
                    order as i64,
                    step.step_name.as_str(),
                    step.responsible_party,
                    step.due_date.to_string(),
                    step.status.as_str()
                ],
            )
            .db_context("Failed to insert workflow step")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Returns the most recently generated plan for an action.
    pub fn latest_workflow(&self, action_id: u64) -> Result<Option<WorkflowPlan>> {
        let header: Option<(String, String)> = self
            .connection
            .query_row(SELECT_LATEST_PLAN_SQL, params![action_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query workflow plan")?;

        let Some((workflow_id, generated_at)) = header else {
            return Ok(None);
        };
        let generated_at = generated_at
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))
            .db_context("Invalid workflow timestamp")?;

        let steps = self.workflow_steps(&workflow_id)?;

        Ok(Some(WorkflowPlan {
            workflow_id,
            action_id,
            generated_at,
            steps,
        }))
    }

    /// Number of plans generated so far for an action.
    pub fn count_workflows(&self, action_id: u64) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_PLANS_SQL, params![action_id as i64], |row| row.get(0))
            .db_context("Failed to count workflow plans")?;
        Ok(count as u64)
    }

    fn workflow_steps(&self, workflow_id: &str) -> Result<Vec<WorkflowStep>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare query")?;

        let steps = stmt
            .query_map(params![workflow_id], |row| {
                let name: String = row.get(0)?;
                let due: String = row.get(2)?;
                let status: String = row.get(3)?;

                Ok(WorkflowStep {
                    step_name: name
                        .parse::<StepName>()
                        .map_err(|message| invalid_text(0, message))?,
                    responsible_party: row.get(1)?,
                    due_date: CalendarDate::parse("due_date", &due)
                        .map_err(|e| invalid_text(2, e.to_string()))?,
                    status: status
                        .parse::<StepStatus>()
                        .map_err(|message| invalid_text(3, message))?,
                })
            })
            .db_context("Failed to query workflow steps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read workflow step rows")?;

        Ok(steps)
    }
}
