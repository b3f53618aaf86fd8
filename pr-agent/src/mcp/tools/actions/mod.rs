//! Tools over the cached GitHub Actions event log
//!
//! The log is written by a separate webhook listener. These tools only read
//! it, and report a missing or malformed log inline rather than failing.

pub mod recent_events;
pub mod workflow_status;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all GitHub Actions tools with the registry
pub fn register_actions_tools(registry: &mut ToolRegistry) {
    registry.register(recent_events::RecentActionsEventsTool::new());
    registry.register(workflow_status::WorkflowStatusTool::new());
}
