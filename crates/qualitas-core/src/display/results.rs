//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{ImprovementAction, WorkflowPlan};

/// Result of a create operation: a headline followed by the resource.
///
/// # Examples
///
/// ```rust
/// use qualitas_core::{display::CreateResult, models::{ActionStatus, ImprovementAction}};
/// use jiff::Timestamp;
///
/// let action = ImprovementAction {
///     id: 12,
///     title: "Torque wrench out of tolerance".to_string(),
///     description: None,
///     action_type: "No Conformitat".to_string(),
///     category: "Metrologia".to_string(),
///     responsible_group_id: "laboratori@example.com".to_string(),
///     creation_date: "02/06/2025".to_string(),
///     status: ActionStatus::Borrador,
///     analysis: None,
///     verification: None,
///     closure: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(action).to_string();
/// assert!(output.starts_with("Created action with ID: 12"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<ImprovementAction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created action with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkflowPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generated workflow {} for action {}",
            self.resource.workflow_id, self.resource.action_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of an update, optionally listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<ImprovementAction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated action with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ImprovementAction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted action '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}
