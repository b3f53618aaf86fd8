//! Tools that inspect the repository's pending changes

pub mod analyze;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all change inspection tools with the registry
pub fn register_change_tools(registry: &mut ToolRegistry) {
    registry.register(analyze::AnalyzeFileChangesTool::new());
}
