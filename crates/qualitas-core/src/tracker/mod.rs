//! High-level tracker API for improvement actions.
//!
//! [`Tracker`] is the entry point used by the CLI and the MCP server. It
//! validates parameters, enforces the action lifecycle and runs every
//! database interaction on tokio's blocking pool.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │    Tracker      │    │    Database     │
//! │  (params)       │───▶│ (action_ops,    │───▶│   (via db/)     │
//! │                 │    │  workflow_ops,  │    │                 │
//! │                 │    │  scan_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Tracker`] instances with configuration
//! - [`action_ops`]: Action creation, queries and lifecycle transitions
//! - [`workflow_ops`]: Workflow plan generation and retrieval
//! - [`scan_ops`]: Due-date scans over the stored actions
//!
//! # Usage
//!
//! ```rust,no_run
//! use qualitas_core::{TrackerBuilder, params::{CreateAction, Id}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/qualitas.db"))
//!     .build()
//!     .await?;
//!
//! let action = tracker
//!     .create_action(&CreateAction {
//!         title: "Supplier delivered out-of-spec batch".to_string(),
//!         description: None,
//!         action_type: "No Conformitat".to_string(),
//!         category: "Compres".to_string(),
//!         responsible_group_id: "compres@example.com".to_string(),
//!         creation_date: Some("03/02/2025".to_string()),
//!     })
//!     .await?;
//!
//! let plan = tracker.plan_workflow(&Id { id: action.id }).await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
    scanner::{Notifier, ScanConfig},
};

pub mod action_ops;
pub mod builder;
pub mod scan_ops;
pub mod workflow_ops;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

/// Main tracker interface for improvement actions.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) scan_config: ScanConfig,
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, scan_config: ScanConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db_path,
            scan_config,
            notifier,
        }
    }

    /// Path of the SQLite database backing this tracker.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(TrackerError::join)?
    }
}
