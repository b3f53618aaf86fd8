//! Workflow status tool for MCP operations

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::WorkflowStatusRequest;
use crate::PrAgentError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Tool summarizing workflow runs from the CI event log
#[derive(Default)]
pub struct WorkflowStatusTool;

impl WorkflowStatusTool {
    /// Creates a new instance of the WorkflowStatusTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for WorkflowStatusTool {
    fn name(&self) -> &'static str {
        "get_workflow_status"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "workflow_name": {
                    "type": "string",
                    "description": "Only report the workflow with this exact name"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: WorkflowStatusRequest = BaseToolImpl::parse_arguments(arguments)?;
        let workflow_name = request
            .workflow_name
            .as_deref()
            .filter(|name| !name.is_empty());

        let response = match context.events.workflow_status(workflow_name) {
            Ok(report) => return BaseToolImpl::create_json_response(&report),
            Err(PrAgentError::EventsFileNotFound(_)) => json!({
                "workflows": {},
                "message": "No events file found",
            }),
            Err(PrAgentError::InvalidEventsFormat(_)) => json!({
                "workflows": {},
                "message": "Invalid events format",
            }),
            Err(e) => json!({ "error": e.to_string() }),
        };
        BaseToolImpl::create_json_response(&response)
    }
}
