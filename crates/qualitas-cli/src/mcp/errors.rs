//! Error conversion for the MCP server.

use qualitas_core::TrackerError;
use rmcp::ErrorData;

/// Wraps a tracker error into an MCP internal error with context.
pub fn to_mcp_error(message: &str, error: &TrackerError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}
