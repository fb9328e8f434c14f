//! MCP server for Qualitas.
//!
//! Exposes the tracker to AI assistants over stdio using the Model Context
//! Protocol.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use qualitas_core::Tracker;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateAction, Id, ListActions, McpResult, PlanWorkflow, RecordStage, ScanDueDates,
};

/// MCP server for Qualitas
#[derive(Clone)]
pub struct QualitasMcpServer {
    tracker: Arc<Mutex<Tracker>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl QualitasMcpServer {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "create_action",
        description = "Open a new improvement action in 'Borrador' (draft) status. Requires title, action_type (e.g. 'No Conformitat', 'Reclamació de Client', 'Auditoria Externa', 'Millora Interna'), category and responsible_group_id. creation_date is dd/MM/yyyy and defaults to today."
    )]
    async fn create_action(&self, params: Parameters<CreateAction>) -> McpResult {
        self.handlers().create_action(params).await
    }

    #[tool(
        name = "list_actions",
        description = "List improvement actions. Finalized actions are hidden unless include_closed=true or a status is given. Optional exact filters: status (label or slug such as 'pendiente-analisis'), action_type, category."
    )]
    async fn list_actions(&self, params: Parameters<ListActions>) -> McpResult {
        self.handlers().list_actions(params).await
    }

    #[tool(
        name = "show_action",
        description = "Show one improvement action with its status and any recorded analysis, verification and closure."
    )]
    async fn show_action(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_action(params).await
    }

    #[tool(
        name = "submit_action",
        description = "Submit a draft action for analysis, moving it from 'Borrador' to 'Pendiente Análisis'. Fails for actions in any other status."
    )]
    async fn submit_action(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().submit_action(params).await
    }

    #[tool(
        name = "record_analysis",
        description = "Record the cause analysis and action plan of an action in 'Pendiente Análisis', moving it to 'Pendiente Comprobación'. Requires the responsible person; notes are optional."
    )]
    async fn record_analysis(&self, params: Parameters<RecordStage>) -> McpResult {
        self.handlers().record_analysis(params).await
    }

    #[tool(
        name = "record_verification",
        description = "Record the verification of the implemented measures of an action in 'Pendiente Comprobación', moving it to 'Pendiente de Cierre'."
    )]
    async fn record_verification(&self, params: Parameters<RecordStage>) -> McpResult {
        self.handlers().record_verification(params).await
    }

    #[tool(
        name = "record_closure",
        description = "Record the closure of an action in 'Pendiente de Cierre', moving it to 'Finalizada'."
    )]
    async fn record_closure(&self, params: Parameters<RecordStage>) -> McpResult {
        self.handlers().record_closure(params).await
    }

    #[tool(
        name = "plan_workflow",
        description = "Generate and store the workflow plan of a stored action. Returns JSON with workflowId, actionId, generatedAt and the ordered steps (stepName, responsibleParty, dueDate as dd/MM/yyyy, status)."
    )]
    async fn plan_workflow(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().plan_workflow(params).await
    }

    #[tool(
        name = "preview_workflow",
        description = "Compute the workflow plan for ad-hoc input (action_id, action_type, category, responsible_group_id, creation_date as dd/MM/yyyy) without storing anything. Returns the same JSON as plan_workflow."
    )]
    async fn preview_workflow(&self, params: Parameters<PlanWorkflow>) -> McpResult {
        self.handlers().preview_workflow(params).await
    }

    #[tool(
        name = "scan_due_dates",
        description = "Evaluate every open action and report workflow steps whose due date has been reached. Use dry_run=true to only list reminders without delivering them; as_of (dd/MM/yyyy) evaluates as of another day; lead_days (non-negative, default 0) reports steps that many days before they fall due. Returns JSON with checkedActions, sentEmails and errors."
    )]
    async fn scan_due_dates(&self, params: Parameters<ScanDueDates>) -> McpResult {
        self.handlers().scan_due_dates(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for QualitasMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "qualitas".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(r#"Qualitas tracks improvement actions (non-conformities, customer complaints, audit findings, internal improvements) through a fixed lifecycle and plans their workflow steps.

## Lifecycle
Borrador → Pendiente Análisis → Pendiente Comprobación → Pendiente de Cierre → Finalizada.
Use `submit_action`, `record_analysis`, `record_verification` and `record_closure` to move an action forward one status at a time.

## Workflow plans
Every action gets cause analysis (+30 days), action plan (+45), implementation verification (+75) and closure (+90).
Regulatory types ('No Conformitat', 'Reclamació de Client', 'Auditoria Externa') add a regulatory impact analysis at +7 and shift the standard steps by 15 days.
The 'Seguretat i Salut Laboral' category adds a safety committee verification 30 days after closure.

## Due dates
`scan_due_dates` reports the steps still outstanding for each action's status whose due date has been reached. Use dry_run=true to inspect without sending."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: QualitasMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Qualitas MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
