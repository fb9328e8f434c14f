//! Workflow step planner.
//!
//! Computes the ordered steps and due dates of an improvement action from its
//! type, category, responsible group and creation date. Every action gets the
//! four standard steps; two independent rules add extra steps:
//!
//! | Rule | Trigger | Effect |
//! |---|---|---|
//! | Regulatory | type is "No Conformitat", "Reclamació de Client" or "Auditoria Externa" | prepend an impact analysis due at +7, shift standard steps by +15 |
//! | Safety | category is "Seguretat i Salut Laboral" | append a committee verification due 30 days after closure |
//!
//! Due dates depend only on the creation date. The clock is read solely to
//! stamp the plan identifier, and [`plan_workflow_at`] takes that instant as
//! an argument.
//!
//! # Examples
//!
//! ```rust
//! use qualitas_core::{models::StepName, params::PlanWorkflow, workflow::plan_steps};
//!
//! let steps = plan_steps(&PlanWorkflow {
//!     action_id: 7,
//!     action_type: "Auditoria Externa".to_string(),
//!     category: "Medi Ambient".to_string(),
//!     responsible_group_id: "qualitat@example.com".to_string(),
//!     creation_date: "01/01/2025".to_string(),
//! })
//! .unwrap();
//!
//! assert_eq!(steps.len(), 5);
//! assert_eq!(steps[0].step_name, StepName::RegulatoryImpactAnalysis);
//! assert_eq!(steps[0].due_date.to_string(), "08/01/2025");
//! assert_eq!(steps[4].due_date.to_string(), "16/04/2025");
//! ```

use jiff::Timestamp;

use crate::{
    dates::CalendarDate,
    error::Result,
    models::{StepName, StepStatus, WorkflowPlan, WorkflowStep},
    params::PlanWorkflow,
};

/// Action types that trigger the regulatory impact analysis.
pub const REGULATORY_ACTION_TYPES: [&str; 3] = [
    "No Conformitat",
    "Reclamació de Client",
    "Auditoria Externa",
];

/// Category that triggers the safety committee verification.
pub const SAFETY_CATEGORY: &str = "Seguretat i Salut Laboral";

/// Owner of the regulatory impact analysis step.
pub const REGULATORY_ESCALATION_CONTACT: &str = "direccio.qualitat@example.com";

/// Owner of the safety committee verification step.
pub const SAFETY_COMMITTEE_CONTACT: &str = "comite.seguretat@example.com";

/// Days from creation to the regulatory impact analysis.
pub const REGULATORY_ANALYSIS_OFFSET_DAYS: i32 = 7;

/// Extra days added to every standard step for regulatory actions.
pub const REGULATORY_EXTENSION_DAYS: i32 = 15;

/// Days from closure to the safety committee verification.
pub const SAFETY_REVIEW_AFTER_CLOSURE_DAYS: i32 = 30;

/// Standard steps and their offsets from the creation date, in order.
pub const STANDARD_STEPS: [(StepName, i32); 4] = [
    (StepName::CauseAnalysis, 30),
    (StepName::ActionPlan, 45),
    (StepName::ImplementationVerification, 75),
    (StepName::ActionClosure, 90),
];

/// Whether the action type falls under the regulatory rule.
pub fn is_regulatory(action_type: &str) -> bool {
    REGULATORY_ACTION_TYPES.contains(&action_type)
}

/// Whether the category falls under the safety rule.
pub fn is_safety_related(category: &str) -> bool {
    category == SAFETY_CATEGORY
}

/// Computes the ordered steps for an action.
///
/// # Errors
///
/// Returns `TrackerError::Validation` when `creation_date` is not a valid
/// `dd/MM/yyyy` date. Unknown types and categories are not errors; they
/// simply do not trigger the additional steps.
pub fn plan_steps(request: &PlanWorkflow) -> Result<Vec<WorkflowStep>> {
    let creation = CalendarDate::parse("creation_date", &request.creation_date)?;
    let regulatory = is_regulatory(&request.action_type);
    let shift = if regulatory {
        REGULATORY_EXTENSION_DAYS
    } else {
        0
    };

    let mut steps = Vec::with_capacity(STANDARD_STEPS.len() + 2);

    if regulatory {
        steps.push(pending_step(
            StepName::RegulatoryImpactAnalysis,
            REGULATORY_ESCALATION_CONTACT,
            creation.plus_days(REGULATORY_ANALYSIS_OFFSET_DAYS)?,
        ));
    }

    let mut closure_due = creation;
    for (name, offset) in STANDARD_STEPS {
        let due = creation.plus_days(offset + shift)?;
        if name == StepName::ActionClosure {
            closure_due = due;
        }
        steps.push(pending_step(name, &request.responsible_group_id, due));
    }

    if is_safety_related(&request.category) {
        steps.push(pending_step(
            StepName::SafetyCommitteeVerification,
            SAFETY_COMMITTEE_CONTACT,
            closure_due.plus_days(SAFETY_REVIEW_AFTER_CLOSURE_DAYS)?,
        ));
    }

    Ok(steps)
}

/// Generates a plan stamped with the current time.
pub fn plan_workflow(request: &PlanWorkflow) -> Result<WorkflowPlan> {
    plan_workflow_at(request, Timestamp::now())
}

/// Generates a plan stamped with `generated_at`.
pub fn plan_workflow_at(request: &PlanWorkflow, generated_at: Timestamp) -> Result<WorkflowPlan> {
    let steps = plan_steps(request)?;
    Ok(WorkflowPlan {
        workflow_id: workflow_id(request.action_id, generated_at),
        action_id: request.action_id,
        generated_at,
        steps,
    })
}

/// Plan identifier: action id plus generation time in unix milliseconds.
pub fn workflow_id(action_id: u64, generated_at: Timestamp) -> String {
    format!("{action_id}-{}", generated_at.as_millisecond())
}

fn pending_step(name: StepName, responsible: &str, due_date: CalendarDate) -> WorkflowStep {
    WorkflowStep {
        step_name: name,
        responsible_party: responsible.to_string(),
        due_date,
        status: StepStatus::Pendiente,
    }
}
