//! Error handling utilities for MCP server

use rmcp::ErrorData;
use waypoint_core::PlannerError;

/// Converts a planner error into an MCP error. Errors caused by the
/// caller's input become `invalid_params`, everything else
/// `internal_error`.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_caller_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}
