//! Change analysis tool for MCP operations

use crate::changes::AnalyzeOptions;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::AnalyzeFileChangesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool reporting changed files, statistics, commits and diff
#[derive(Default)]
pub struct AnalyzeFileChangesTool;

impl AnalyzeFileChangesTool {
    /// Creates a new instance of the AnalyzeFileChangesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AnalyzeFileChangesTool {
    fn name(&self) -> &'static str {
        "analyze_file_changes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "base_branch": {
                    "type": "string",
                    "description": "Branch or commit to compare against",
                    "default": "main"
                },
                "include_diff": {
                    "type": "boolean",
                    "description": "Include the diff body in the result",
                    "default": true
                },
                "max_diff_lines": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Keep only this many diff lines instead of applying the character budget"
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
        let request: AnalyzeFileChangesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let options = AnalyzeOptions {
            base_branch: request
                .base_branch
                .filter(|branch| !branch.trim().is_empty())
                .unwrap_or_else(|| context.config.base_branch.clone()),
            include_diff: request.include_diff,
            max_diff_lines: request.max_diff_lines,
        };
        tracing::debug!("Analyzing changes against {}", options.base_branch);

        let change_set = context.inspector.analyze(&options);
        BaseToolImpl::create_json_response(&change_set)
    }
}
