//! Workflow plan and step models.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StepStatus;
use crate::dates::CalendarDate;

/// The fixed vocabulary of workflow steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StepName {
    /// Conditional first step for regulatory action types
    #[serde(rename = "Análisis de Impacto Regulatorio")]
    RegulatoryImpactAnalysis,
    #[serde(rename = "Análisis de Causas")]
    CauseAnalysis,
    #[serde(rename = "Plan de Acción")]
    ActionPlan,
    #[serde(rename = "Verificación de Implantación")]
    ImplementationVerification,
    #[serde(rename = "Cierre de la Acción")]
    ActionClosure,
    /// Conditional last step for the occupational safety category
    #[serde(rename = "Verificación de Seguridad por Comité")]
    SafetyCommitteeVerification,
}

impl StepName {
    pub const ALL: [StepName; 6] = [
        StepName::RegulatoryImpactAnalysis,
        StepName::CauseAnalysis,
        StepName::ActionPlan,
        StepName::ImplementationVerification,
        StepName::ActionClosure,
        StepName::SafetyCommitteeVerification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::RegulatoryImpactAnalysis => "Análisis de Impacto Regulatorio",
            StepName::CauseAnalysis => "Análisis de Causas",
            StepName::ActionPlan => "Plan de Acción",
            StepName::ImplementationVerification => "Verificación de Implantación",
            StepName::ActionClosure => "Cierre de la Acción",
            StepName::SafetyCommitteeVerification => "Verificación de Seguridad por Comité",
        }
    }
}

impl FromStr for StepName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("Invalid step name: {s}"))
    }
}

/// One step of a generated workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    /// Which step this is
    pub step_name: StepName,

    /// Identifier or e-mail of whoever must complete the step
    pub responsible_party: String,

    /// Deadline, exchanged as `dd/MM/yyyy`
    pub due_date: CalendarDate,

    /// Progress of the step; new steps are pending
    #[serde(default)]
    pub status: StepStatus,
}

/// Ordered list of steps generated for one action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPlan {
    /// `"{action_id}-{generation unix milliseconds}"`
    pub workflow_id: String,

    /// The action the plan was generated for
    pub action_id: u64,

    /// When the plan was generated (UTC)
    pub generated_at: Timestamp,

    /// Steps in execution order
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowPlan {
    /// Finds the step with the given name, if the plan has one.
    pub fn step(&self, name: StepName) -> Option<&WorkflowStep> {
        self.steps.iter().find(|step| step.step_name == name)
    }
}
