//! Core library for the Qualitas improvement-action tracker.
//!
//! An improvement action is a quality-management record (a non-conformity,
//! customer complaint, audit finding or internal improvement) that moves
//! through a fixed lifecycle from draft to finalized. This crate provides:
//!
//! - [`workflow`]: the pure step planner deriving steps and due dates from an
//!   action's type, category and creation date
//! - [`scanner`]: a single-pass due-date scanner that reports outstanding
//!   steps through a pluggable [`Notifier`]
//! - [`tracker`]: the async facade persisting actions and plans in SQLite
//! - [`display`]: markdown formatting shared by the CLI and the MCP server
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use qualitas_core::{
//!     TrackerBuilder,
//!     params::{CreateAction, Id, ScanDueDates},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("qualitas.db"))
//!     .build()
//!     .await?;
//!
//! let action = tracker
//!     .create_action(&CreateAction {
//!         title: "Guard rail missing on mezzanine".to_string(),
//!         description: None,
//!         action_type: "Millora Interna".to_string(),
//!         category: "Seguretat i Salut Laboral".to_string(),
//!         responsible_group_id: "manteniment@example.com".to_string(),
//!         creation_date: None,
//!     })
//!     .await?;
//!
//! let plan = tracker.plan_workflow(&Id { id: action.id }).await?;
//! println!("{plan}");
//!
//! let summary = tracker
//!     .scan_due_dates(&ScanDueDates {
//!         dry_run: true,
//!         as_of: None,
//!         lead_days: None,
//!     })
//!     .await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod dates;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod scanner;
pub mod tracker;
pub mod workflow;

// Re-export commonly used types
pub use dates::CalendarDate;
pub use db::Database;
pub use display::{Actions, CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{Result, TrackerError};
pub use models::{
    ActionFilter, ActionStatus, ImprovementAction, Reminder, ScanSummary, StepName, StepStatus,
    WorkflowPlan, WorkflowStep,
};
pub use scanner::{DueDateScanner, LogNotifier, Notifier, ScanConfig};
pub use tracker::{Tracker, TrackerBuilder};
