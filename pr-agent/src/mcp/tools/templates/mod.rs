//! Tools for PR description templates
//!
//! - **list**: every template with its content
//! - **suggest**: map a change type to one template

pub mod list;
pub mod suggest;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all template tools with the registry
pub fn register_template_tools(registry: &mut ToolRegistry) {
    registry.register(list::GetPrTemplatesTool::new());
    registry.register(suggest::SuggestTemplateTool::new());
}
