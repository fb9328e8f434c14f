//! Qualitas CLI application.
//!
//! Command-line interface and MCP server for tracking improvement actions.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, QualitasMcpServer};
use qualitas_core::{params::ListActions, TrackerBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Qualitas started");

    match command {
        Some(Action { command }) => {
            Cli::new(tracker, renderer)
                .handle_action_command(command)
                .await
        }
        Some(Workflow { command }) => {
            Cli::new(tracker, renderer)
                .handle_workflow_command(command)
                .await
        }
        Some(Scan(args)) => Cli::new(tracker, renderer).scan(args).await,
        Some(Serve) => {
            info!("Starting Qualitas MCP server");
            run_stdio_server(QualitasMcpServer::new(tracker))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(tracker, renderer)
                .list_actions(&ListActions::default())
                .await
        }
    }
}
