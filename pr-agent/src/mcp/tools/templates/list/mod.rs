//! Template listing tool for MCP operations

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetPrTemplatesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Tool listing every PR template with its content
#[derive(Default)]
pub struct GetPrTemplatesTool;

impl GetPrTemplatesTool {
    /// Creates a new instance of the GetPrTemplatesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPrTemplatesTool {
    fn name(&self) -> &'static str {
        "get_pr_templates"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: GetPrTemplatesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let response = match context.templates.list_templates() {
            Ok(templates) => json!({
                "total_templates": templates.len(),
                "templates": templates,
            }),
            Err(e) => {
                tracing::warn!("Listing templates failed: {}", e);
                json!({
                    "error": e.to_string(),
                    "templates": [],
                })
            }
        };
        BaseToolImpl::create_json_response(&response)
    }
}
