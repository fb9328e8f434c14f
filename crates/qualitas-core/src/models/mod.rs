//! Data models for improvement actions, workflow plans and scan results.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that formatting stays separate from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use qualitas_core::models::{ActionStatus, ImprovementAction};
//! use jiff::Timestamp;
//!
//! let action = ImprovementAction {
//!     id: 1,
//!     title: "Calibration certificate expired".to_string(),
//!     description: None,
//!     action_type: "No Conformitat".to_string(),
//!     category: "Metrologia".to_string(),
//!     responsible_group_id: "laboratori@example.com".to_string(),
//!     creation_date: "10/03/2025".to_string(),
//!     status: ActionStatus::Borrador,
//! #   analysis: None,
//! #   verification: None,
//! #   closure: None,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! println!("{}", action);
//! ```

pub mod action;
pub mod filters;
pub mod scan;
pub mod status;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use action::{ImprovementAction, Stage, StageRecord};
pub use filters::ActionFilter;
pub use scan::{Reminder, ScanSummary};
pub use status::{ActionStatus, StepStatus};
pub use workflow::{StepName, WorkflowPlan, WorkflowStep};
