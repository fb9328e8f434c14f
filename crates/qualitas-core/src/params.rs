//! Parameter structures for tracker operations
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde. JSON schema generation for the
//! MCP server is enabled with the `schema` feature.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers wrap or convert into these types; the tracker only ever
//! sees the core structures. Dates are always `dd/MM/yyyy` strings here and
//! are validated by the tracker, not by the interface.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::ImprovementAction;

/// Generic parameters for operations requiring just an action ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the improvement action to operate on
    pub id: u64,
}

/// Parameters for opening a new improvement action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateAction {
    /// Short summary of the finding (required)
    pub title: String,
    /// Optional detailed description
    #[serde(default)]
    pub description: Option<String>,
    /// Action type, e.g. "No Conformitat", "Reclamació de Client",
    /// "Auditoria Externa"
    pub action_type: String,
    /// Category, e.g. "Seguretat i Salut Laboral"
    pub category: String,
    /// Identifier or e-mail of the responsible group
    pub responsible_group_id: String,
    /// Opening date as dd/MM/yyyy; defaults to today
    #[serde(default)]
    pub creation_date: Option<String>,
}

/// Parameters for listing actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListActions {
    /// Only actions in this status (label such as "Pendiente Análisis" or
    /// slug such as "pendiente-analisis")
    #[serde(default)]
    pub status: Option<String>,
    /// Only actions of this exact type
    #[serde(default)]
    pub action_type: Option<String>,
    /// Only actions in this exact category
    #[serde(default)]
    pub category: Option<String>,
    /// Include finalized actions when no status is given
    #[serde(default)]
    pub include_closed: bool,
}

/// Parameters for signing off a lifecycle stage (analysis, verification or
/// closure).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecordStage {
    /// ID of the action
    pub id: u64,
    /// Person or group signing off the stage
    pub responsible: String,
    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parameters for permanently deleting an action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteAction {
    /// ID of the action to delete
    pub id: u64,
    /// Must be true; deletion also removes the action's workflow plans
    #[serde(default)]
    pub confirmed: bool,
}

/// Input of the workflow step planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanWorkflow {
    /// Action the plan is generated for
    #[serde(default)]
    pub action_id: u64,
    /// Action type; regulatory types add an impact-analysis step
    pub action_type: String,
    /// Category; the occupational safety category adds a committee step
    pub category: String,
    /// Owner of the standard steps
    pub responsible_group_id: String,
    /// Origin of every due date, as dd/MM/yyyy
    pub creation_date: String,
}

impl From<&ImprovementAction> for PlanWorkflow {
    fn from(action: &ImprovementAction) -> Self {
        Self {
            action_id: action.id,
            action_type: action.action_type.clone(),
            category: action.category.clone(),
            responsible_group_id: action.responsible_group_id.clone(),
            creation_date: action.creation_date.clone(),
        }
    }
}

/// Parameters for a due-date scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScanDueDates {
    /// Report reminders without delivering them
    #[serde(default)]
    pub dry_run: bool,
    /// Evaluate as of this dd/MM/yyyy date instead of today
    #[serde(default)]
    pub as_of: Option<String>,
    /// Report steps this many days before they fall due; defaults to the
    /// tracker's configured lead
    #[serde(default)]
    pub lead_days: Option<i32>,
}
