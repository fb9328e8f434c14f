use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActionCommands, ScanArgs, WorkflowCommands};

/// Improvement-action tracker
///
/// Records improvement actions (non-conformities, customer complaints, audit
/// findings and internal improvements), plans their workflow steps with due
/// dates and reports steps that are due. Runs either as a command-line tool
/// or as an MCP server over stdio.
#[derive(Parser)]
#[command(version, about, name = "qm")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/qualitas/qualitas.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage improvement actions
    #[command(alias = "a")]
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },
    /// Generate and inspect workflow plans
    #[command(alias = "w")]
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
    /// Report workflow steps that are due
    Scan(ScanArgs),
    /// Start the MCP server
    Serve,
}
