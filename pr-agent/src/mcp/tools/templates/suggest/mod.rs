//! Template suggestion tool for MCP operations

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SuggestTemplateRequest;
use crate::templates::known_template_files;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Tool choosing a PR template from a change type
#[derive(Default)]
pub struct SuggestTemplateTool;

impl SuggestTemplateTool {
    /// Creates a new instance of the SuggestTemplateTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SuggestTemplateTool {
    fn name(&self) -> &'static str {
        "suggest_template"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "changes_summary": {
                    "type": "string",
                    "description": "Your analysis of what the changes do"
                },
                "change_type": {
                    "type": "string",
                    "description": "Type of change: bug, feature, docs, refactor, test, performance, security"
                }
            },
            "required": ["changes_summary", "change_type"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SuggestTemplateRequest = BaseToolImpl::parse_arguments(arguments)?;

        match context
            .templates
            .suggest(&request.changes_summary, &request.change_type)
        {
            Ok(suggestion) => BaseToolImpl::create_json_response(&suggestion),
            Err(e) => {
                tracing::warn!("No template for change type '{}': {}", request.change_type, e);
                BaseToolImpl::create_json_response(&json!({
                    "error": e.to_string(),
                    "available_templates": known_template_files(),
                    "detected_change_type": request.change_type,
                }))
            }
        }
    }
}
