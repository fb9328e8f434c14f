//! MCP tool handlers.

use std::sync::Arc;

use log::debug;
use qualitas_core::{
    display::{Actions, CreateResult, UpdateResult},
    params as core, ImprovementAction, Tracker,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Transparent MCP wrapper around a core parameter type.
///
/// Keeps rmcp's trait requirements out of `qualitas_core::params`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateAction = McpParams<core::CreateAction>;
pub type ListActions = McpParams<core::ListActions>;
pub type RecordStage = McpParams<core::RecordStage>;
pub type PlanWorkflow = McpParams<core::PlanWorkflow>;
pub type ScanDueDates = McpParams<core::ScanDueDates>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> CallToolResult {
    CallToolResult::success(vec![Content::text(output.to_string())])
}

fn json<T: serde::Serialize>(value: &T) -> McpResult {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Failed to serialize result: {e}"), None))?;
    Ok(text(body))
}

/// Tool implementations backing [`super::QualitasMcpServer`].
pub struct McpHandlers {
    tracker: Arc<Mutex<Tracker>>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<Mutex<Tracker>>) -> Self {
        Self { tracker }
    }

    pub async fn create_action(&self, Parameters(params): Parameters<CreateAction>) -> McpResult {
        debug!("create_action: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .create_action(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create action", &e))?;

        Ok(text(CreateResult::new(action)))
    }

    pub async fn list_actions(&self, Parameters(params): Parameters<ListActions>) -> McpResult {
        debug!("list_actions: {params:?}");

        let inner = params.as_ref();
        let actions = self
            .tracker
            .lock()
            .await
            .list_actions(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list actions", &e))?;

        let title = if inner.include_closed || inner.status.is_some() {
            "Actions"
        } else {
            "Open Actions"
        };
        Ok(text(format!("# {title}\n\n{}", Actions(actions))))
    }

    pub async fn show_action(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_action: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .get_action(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get action", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Action with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        Ok(text(action))
    }

    pub async fn submit_action(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("submit_action: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .submit_action(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to submit action", &e))?;

        Ok(updated(action, "Submitted for analysis"))
    }

    pub async fn record_analysis(&self, Parameters(params): Parameters<RecordStage>) -> McpResult {
        debug!("record_analysis: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .record_analysis(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to record analysis", &e))?;

        Ok(updated(action, "Recorded analysis"))
    }

    pub async fn record_verification(
        &self,
        Parameters(params): Parameters<RecordStage>,
    ) -> McpResult {
        debug!("record_verification: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .record_verification(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to record verification", &e))?;

        Ok(updated(action, "Recorded verification"))
    }

    pub async fn record_closure(&self, Parameters(params): Parameters<RecordStage>) -> McpResult {
        debug!("record_closure: {params:?}");

        let action = self
            .tracker
            .lock()
            .await
            .record_closure(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to record closure", &e))?;

        Ok(updated(action, "Recorded closure"))
    }

    pub async fn plan_workflow(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("plan_workflow: {params:?}");

        let plan = self
            .tracker
            .lock()
            .await
            .plan_workflow(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to plan workflow", &e))?;

        json(&plan)
    }

    pub async fn preview_workflow(
        &self,
        Parameters(params): Parameters<PlanWorkflow>,
    ) -> McpResult {
        debug!("preview_workflow: {params:?}");

        let plan = self
            .tracker
            .lock()
            .await
            .preview_workflow(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to preview workflow", &e))?;

        json(&plan)
    }

    pub async fn scan_due_dates(&self, Parameters(params): Parameters<ScanDueDates>) -> McpResult {
        debug!("scan_due_dates: {params:?}");

        let summary = self
            .tracker
            .lock()
            .await
            .scan_due_dates(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Due-date scan failed", &e))?;

        json(&summary)
    }
}

fn updated(action: ImprovementAction, change: &str) -> CallToolResult {
    let change = format!("{change}; status is now '{}'", action.status);
    text(UpdateResult::with_changes(action, vec![change]))
}
