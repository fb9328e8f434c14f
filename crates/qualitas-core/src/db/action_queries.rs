//! Improvement action CRUD operations and lifecycle updates.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use super::invalid_text;
use crate::{
    dates::CalendarDate,
    error::{DatabaseResultExt, Result, TrackerError},
    models::{ActionFilter, ActionStatus, ImprovementAction, Stage, StageRecord},
    params::CreateAction,
};

const ACTION_COLUMNS: &str = "id, title, description, action_type, category, responsible_group_id, creation_date, status, analysis, verification, closure, created_at, updated_at";
const INSERT_ACTION_SQL: &str = "INSERT INTO actions (title, description, action_type, category, responsible_group_id, creation_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_STATUS_SQL: &str = "SELECT status FROM actions WHERE id = ?1";
const UPDATE_STATUS_SQL: &str = "UPDATE actions SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_ANALYSIS_SQL: &str =
    "UPDATE actions SET status = ?1, analysis = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_VERIFICATION_SQL: &str =
    "UPDATE actions SET status = ?1, verification = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_CLOSURE_SQL: &str =
    "UPDATE actions SET status = ?1, closure = ?2, updated_at = ?3 WHERE id = ?4";
const DELETE_ACTION_STEPS_SQL: &str = "DELETE FROM workflow_steps WHERE workflow_id IN (SELECT workflow_id FROM workflow_plans WHERE action_id = ?1)";
const DELETE_ACTION_PLANS_SQL: &str = "DELETE FROM workflow_plans WHERE action_id = ?1";
const DELETE_ACTION_SQL: &str = "DELETE FROM actions WHERE id = ?1";

impl super::Database {
    /// Stores a new action in draft status.
    ///
    /// The creation date must already be validated; it is stored in its
    /// `dd/MM/yyyy` form.
    pub fn create_action(
        &mut self,
        params: &CreateAction,
        creation_date: CalendarDate,
    ) -> Result<ImprovementAction> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let creation_date = creation_date.to_string();
        let status = ActionStatus::Borrador;

        tx.execute(
            INSERT_ACTION_SQL,
            params![
                params.title,
                params.description,
                params.action_type,
                params.category,
                params.responsible_group_id,
                creation_date,
                status.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert action")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ImprovementAction {
            id,
            title: params.title.clone(),
            description: params.description.clone(),
            action_type: params.action_type.clone(),
            category: params.category.clone(),
            responsible_group_id: params.responsible_group_id.clone(),
            creation_date,
            status,
            analysis: None,
            verification: None,
            closure: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an action by its ID.
    pub fn get_action(&self, id: u64) -> Result<Option<ImprovementAction>> {
        let query = format!("SELECT {ACTION_COLUMNS} FROM actions WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], row_to_action)
            .optional()
            .db_context("Failed to query action")
    }

    /// Lists actions in ID order, optionally filtered.
    pub fn list_actions(&self, filter: Option<&ActionFilter>) -> Result<Vec<ImprovementAction>> {
        let mut query = format!("SELECT {ACTION_COLUMNS} FROM actions");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str()));
            } else if f.open_only {
                conditions.push("status != ?");
                params_vec.push(Box::new(ActionStatus::Finalizada.as_str()));
            }

            if let Some(ref action_type) = f.action_type {
                conditions.push("action_type = ?");
                params_vec.push(Box::new(action_type.clone()));
            }

            if let Some(ref category) = f.category {
                conditions.push("category = ?");
                params_vec.push(Box::new(category.clone()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let actions = stmt
            .query_map(&params_refs[..], row_to_action)
            .db_context("Failed to query actions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read action rows")?;

        Ok(actions)
    }

    /// Moves an action from `from` to `to`, storing the stage record when
    /// one is given.
    ///
    /// The current status is re-read inside the transaction; if it is not
    /// `from` nothing is written and `TrackerError::InvalidTransition` is
    /// returned.
    pub fn advance_action(
        &mut self,
        id: u64,
        from: ActionStatus,
        to: ActionStatus,
        stage: Option<(Stage, &StageRecord)>,
    ) -> Result<ImprovementAction> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current: Option<String> = tx
            .query_row(SELECT_STATUS_SQL, params![id as i64], |row| row.get(0))
            .optional()
            .db_context("Failed to query action status")?;
        let Some(current) = current else {
            return Err(TrackerError::ActionNotFound { id });
        };
        let current = current
            .parse::<ActionStatus>()
            .map_err(|message| TrackerError::Configuration { message })?;

        if current != from {
            return Err(TrackerError::InvalidTransition {
                id,
                from: current,
                to,
            });
        }

        let now = Timestamp::now().to_string();
        match stage {
            Some((stage, record)) => {
                let record_json = serde_json::to_string(record)?;
                let sql = match stage {
                    Stage::Analysis => UPDATE_ANALYSIS_SQL,
                    Stage::Verification => UPDATE_VERIFICATION_SQL,
                    Stage::Closure => UPDATE_CLOSURE_SQL,
                };
                tx.execute(sql, params![to.as_str(), record_json, now, id as i64])
                    .db_context("Failed to record stage")?;
            }
            None => {
                tx.execute(UPDATE_STATUS_SQL, params![to.as_str(), now, id as i64])
                    .db_context("Failed to update action status")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_action(id)?
            .ok_or(TrackerError::ActionNotFound { id })
    }

    /// Permanently deletes an action together with its workflow plans.
    pub fn delete_action(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_ACTION_STEPS_SQL, params![id as i64])
            .db_context("Failed to delete workflow steps")?;
        tx.execute(DELETE_ACTION_PLANS_SQL, params![id as i64])
            .db_context("Failed to delete workflow plans")?;
        let deleted = tx
            .execute(DELETE_ACTION_SQL, params![id as i64])
            .db_context("Failed to delete action")?;

        if deleted == 0 {
            return Err(TrackerError::ActionNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}

fn timestamp_column(row: &Row<'_>, column: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(column)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn stage_column(row: &Row<'_>, column: usize) -> rusqlite::Result<Option<StageRecord>> {
    row.get::<_, Option<String>>(column)?
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn row_to_action(row: &Row<'_>) -> rusqlite::Result<ImprovementAction> {
    let status_str: String = row.get(7)?;
    let status = status_str
        .parse::<ActionStatus>()
        .map_err(|message| invalid_text(7, message))?;

    Ok(ImprovementAction {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        description: row.get(2)?,
        action_type: row.get(3)?,
        category: row.get(4)?,
        responsible_group_id: row.get(5)?,
        creation_date: row.get(6)?,
        status,
        analysis: stage_column(row, 8)?,
        verification: stage_column(row, 9)?,
        closure: stage_column(row, 10)?,
        created_at: timestamp_column(row, 11)?,
        updated_at: timestamp_column(row, 12)?,
    })
}
