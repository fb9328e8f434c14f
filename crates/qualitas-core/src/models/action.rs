//! Improvement action model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ActionStatus;

/// A trackable quality record (non-conformity, audit finding, complaint).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImprovementAction {
    /// Unique identifier, assigned at creation
    pub id: u64,

    /// Short summary of the action
    pub title: String,

    /// Detailed description of the finding
    pub description: Option<String>,

    /// Kind of action, e.g. "No Conformitat" or "Auditoria Externa"
    pub action_type: String,

    /// Classification, e.g. "Seguretat i Salut Laboral"
    pub category: String,

    /// Identifier or e-mail of the owning group
    pub responsible_group_id: String,

    /// Opening date as `dd/MM/yyyy`; origin of every due date
    pub creation_date: String,

    /// Current lifecycle status
    #[serde(default)]
    pub status: ActionStatus,

    /// Cause analysis and action plan, once recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<StageRecord>,

    /// Verification of the implemented actions, once recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<StageRecord>,

    /// Closure record, once recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure: Option<StageRecord>,

    /// Timestamp when the action was stored (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the action was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Sign-off recorded when an action leaves one of its working stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageRecord {
    /// Person or group that signed off the stage
    pub responsible: String,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the stage was recorded (UTC)
    pub recorded_at: Timestamp,
}

/// The working stages that carry a [`StageRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analysis,
    Verification,
    Closure,
}

impl Stage {
    /// Status an action must be in for this stage to be recorded.
    pub fn required_status(&self) -> ActionStatus {
        match self {
            Stage::Analysis => ActionStatus::PendienteAnalisis,
            Stage::Verification => ActionStatus::PendienteComprobacion,
            Stage::Closure => ActionStatus::PendienteCierre,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Analysis => "analysis",
            Stage::Verification => "verification",
            Stage::Closure => "closure",
        }
    }
}
