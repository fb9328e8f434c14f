//! Command-line arguments and their handlers.
//!
//! Each clap argument struct converts into a framework-free parameter type
//! from `qualitas_core::params`, so the CLI and the MCP server drive the
//! tracker through the same inputs:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use qualitas_core::{
    display::{Actions, CreateResult, DeleteResult, UpdateResult},
    params::*,
    ImprovementAction, Tracker,
};
use serde::Serialize;

use crate::renderer::TerminalRenderer;

/// Create a new improvement action in draft status
#[derive(Args)]
pub struct CreateActionArgs {
    /// Short title of the action
    pub title: String,
    /// Type of action, e.g. "No Conformitat" or "Millora Interna"
    #[arg(long = "type")]
    pub action_type: String,
    /// Category, e.g. "Seguretat i Salut Laboral"
    #[arg(long)]
    pub category: String,
    /// Group or e-mail responsible for the standard steps
    #[arg(long)]
    pub responsible: String,
    /// Creation date as dd/MM/yyyy; defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Optional longer description
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateActionArgs> for CreateAction {
    fn from(val: CreateActionArgs) -> Self {
        CreateAction {
            title: val.title,
            description: val.description,
            action_type: val.action_type,
            category: val.category,
            responsible_group_id: val.responsible,
            creation_date: val.date,
        }
    }
}

/// List improvement actions
///
/// Finalized actions are hidden unless --all is given or a status is
/// requested explicitly.
#[derive(Args)]
pub struct ListActionsArgs {
    /// Only actions in this status (label or slug, e.g. pendiente-analisis)
    #[arg(short, long)]
    pub status: Option<String>,
    /// Only actions of this exact type
    #[arg(long = "type")]
    pub action_type: Option<String>,
    /// Only actions in this exact category
    #[arg(long)]
    pub category: Option<String>,
    /// Include finalized actions
    #[arg(long)]
    pub all: bool,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListActionsArgs> for ListActions {
    fn from(val: &ListActionsArgs) -> Self {
        ListActions {
            status: val.status.clone(),
            action_type: val.action_type.clone(),
            category: val.category.clone(),
            include_closed: val.all,
        }
    }
}

#[derive(Args)]
pub struct IdArgs {
    /// ID of the action
    pub id: u64,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&IdArgs> for Id {
    fn from(val: &IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Record a completed lifecycle stage
#[derive(Args)]
pub struct StageArgs {
    /// ID of the action
    pub id: u64,
    /// Who carried out the stage
    #[arg(short, long)]
    pub responsible: String,
    /// Findings or remarks
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<StageArgs> for RecordStage {
    fn from(val: StageArgs) -> Self {
        RecordStage {
            id: val.id,
            responsible: val.responsible,
            notes: val.notes,
        }
    }
}

/// Permanently delete an action and its workflow plans
#[derive(Args)]
pub struct DeleteActionArgs {
    /// ID of the action to delete
    pub id: u64,
    /// Confirm the deletion
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteActionArgs> for DeleteAction {
    fn from(val: DeleteActionArgs) -> Self {
        DeleteAction {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum ActionCommands {
    /// Create a new action
    #[command(alias = "c")]
    Create(CreateActionArgs),
    /// List actions
    #[command(aliases = ["l", "ls"])]
    List(ListActionsArgs),
    /// Show an action
    #[command(alias = "s")]
    Show(IdArgs),
    /// Submit a draft for analysis
    Submit(IdArgs),
    /// Record the cause analysis and action plan
    Analyze(StageArgs),
    /// Record the verification of the implemented measures
    Verify(StageArgs),
    /// Record the closure, finalizing the action
    Close(StageArgs),
    /// Delete an action
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteActionArgs),
}

/// Plan the workflow for ad-hoc input without storing anything
#[derive(Args)]
pub struct PreviewArgs {
    /// Type of action
    #[arg(long = "type")]
    pub action_type: String,
    /// Category of the action
    #[arg(long)]
    pub category: String,
    /// Group or e-mail responsible for the standard steps
    #[arg(long)]
    pub responsible: String,
    /// Creation date as dd/MM/yyyy
    #[arg(long)]
    pub date: String,
    /// Action ID used in the workflow identifier
    #[arg(long, default_value_t = 0)]
    pub action_id: u64,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&PreviewArgs> for PlanWorkflow {
    fn from(val: &PreviewArgs) -> Self {
        PlanWorkflow {
            action_id: val.action_id,
            action_type: val.action_type.clone(),
            category: val.category.clone(),
            responsible_group_id: val.responsible.clone(),
            creation_date: val.date.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// Generate and store the workflow plan of an action
    #[command(alias = "p")]
    Plan(IdArgs),
    /// Show the latest stored plan of an action
    #[command(alias = "s")]
    Show(IdArgs),
    /// Plan ad-hoc input without touching the database
    Preview(PreviewArgs),
}

/// Evaluate every open action and report the steps that are due
#[derive(Args)]
pub struct ScanArgs {
    /// Only list the reminders; do not deliver anything
    #[arg(long)]
    pub dry_run: bool,
    /// Evaluate as of this dd/MM/yyyy date instead of today
    #[arg(long)]
    pub as_of: Option<String>,
    /// Report steps this many days before they fall due
    #[arg(long, default_value_t = 0)]
    pub lead_days: i32,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ScanArgs> for ScanDueDates {
    fn from(val: &ScanArgs) -> Self {
        ScanDueDates {
            dry_run: val.dry_run,
            as_of: val.as_of.clone(),
            lead_days: Some(val.lead_days),
        }
    }
}

/// Runs CLI commands against a tracker.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_action_command(&self, command: ActionCommands) -> Result<()> {
        match command {
            ActionCommands::Create(args) => {
                let action = self
                    .tracker
                    .create_action(&args.into())
                    .await
                    .context("Failed to create action")?;
                self.renderer
                    .render(&CreateResult::new(action).to_string())
            }
            ActionCommands::List(args) => {
                let params = ListActions::from(&args);
                if args.json {
                    let actions = self
                        .tracker
                        .list_actions(&params)
                        .await
                        .context("Failed to list actions")?;
                    print_json(&actions)
                } else {
                    self.list_actions(&params).await
                }
            }
            ActionCommands::Show(args) => {
                let action = self
                    .tracker
                    .get_action(&Id::from(&args))
                    .await
                    .context("Failed to get action")?
                    .ok_or_else(|| anyhow!("Action with ID {} not found", args.id))?;
                self.output(&action, args.json)
            }
            ActionCommands::Submit(args) => {
                let action = self
                    .tracker
                    .submit_action(&Id::from(&args))
                    .await
                    .context("Failed to submit action")?;
                self.updated(action, "Submitted for analysis")
            }
            ActionCommands::Analyze(args) => {
                let action = self
                    .tracker
                    .record_analysis(&args.into())
                    .await
                    .context("Failed to record analysis")?;
                self.updated(action, "Recorded analysis")
            }
            ActionCommands::Verify(args) => {
                let action = self
                    .tracker
                    .record_verification(&args.into())
                    .await
                    .context("Failed to record verification")?;
                self.updated(action, "Recorded verification")
            }
            ActionCommands::Close(args) => {
                let action = self
                    .tracker
                    .record_closure(&args.into())
                    .await
                    .context("Failed to record closure")?;
                self.updated(action, "Recorded closure")
            }
            ActionCommands::Delete(args) => {
                let action = self
                    .tracker
                    .delete_action(&args.into())
                    .await
                    .context("Failed to delete action")?;
                self.renderer
                    .render(&DeleteResult::new(action).to_string())
            }
        }
    }

    pub async fn handle_workflow_command(&self, command: WorkflowCommands) -> Result<()> {
        match command {
            WorkflowCommands::Plan(args) => {
                let plan = self
                    .tracker
                    .plan_workflow(&Id::from(&args))
                    .await
                    .context("Failed to plan workflow")?;
                if args.json {
                    print_json(&plan)
                } else {
                    self.renderer.render(&CreateResult::new(plan).to_string())
                }
            }
            WorkflowCommands::Show(args) => {
                let plan = self
                    .tracker
                    .show_workflow(&Id::from(&args))
                    .await
                    .context("Failed to show workflow")?;
                self.output(&plan, args.json)
            }
            WorkflowCommands::Preview(args) => {
                let plan = self
                    .tracker
                    .preview_workflow(&PlanWorkflow::from(&args))
                    .context("Failed to preview workflow")?;
                self.output(&plan, args.json)
            }
        }
    }

    pub async fn scan(&self, args: ScanArgs) -> Result<()> {
        let summary = self
            .tracker
            .scan_due_dates(&ScanDueDates::from(&args))
            .await
            .context("Due-date scan failed")?;
        self.output(&summary, args.json)
    }

    pub async fn list_actions(&self, params: &ListActions) -> Result<()> {
        let actions = self
            .tracker
            .list_actions(params)
            .await
            .context("Failed to list actions")?;

        let title = if params.include_closed || params.status.is_some() {
            "Actions"
        } else {
            "Open Actions"
        };
        self.renderer
            .render(&format!("# {title}\n\n{}", Actions(actions)))
    }

    fn updated(&self, action: ImprovementAction, change: &str) -> Result<()> {
        let change = format!("{change}; status is now '{}'", action.status);
        self.renderer
            .render(&UpdateResult::with_changes(action, vec![change]).to_string())
    }

    fn output<T>(&self, value: &T, json: bool) -> Result<()>
    where
        T: Serialize + std::fmt::Display,
    {
        if json {
            print_json(value)
        } else {
            self.renderer.render(&value.to_string())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
