//! Recent CI events tool for MCP operations

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::RecentActionsEventsRequest;
use crate::PrAgentError;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::json;

/// Tool returning the first events of the CI event log
#[derive(Default)]
pub struct RecentActionsEventsTool;

impl RecentActionsEventsTool {
    /// Creates a new instance of the RecentActionsEventsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for RecentActionsEventsTool {
    fn name(&self) -> &'static str {
        "get_recent_actions_events"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Maximum number of events to return",
                    "default": 10
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
        let request: RecentActionsEventsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let limit = request.limit.unwrap_or(context.config.default_event_limit);

        match context.events.recent(limit) {
            Ok(recent) => BaseToolImpl::create_json_response(&recent),
            Err(PrAgentError::EventsFileNotFound(path)) => {
                tracing::debug!("No events file at {}", path.display());
                BaseToolImpl::create_json_response(&json!({
                    "events": [],
                    "message": "No events file found",
                }))
            }
            Err(PrAgentError::InvalidEventsFormat(details)) => {
                tracing::warn!("Ignoring malformed events file: {}", details);
                BaseToolImpl::create_json_response(&json!({
                    "events": [],
                    "total_events": 0,
                    "showing": 0,
                }))
            }
            Err(e) => BaseToolImpl::create_json_response(&json!({ "error": e.to_string() })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{response_json, test_context, write_events};
    use tempfile::TempDir;

    fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_missing_log() {
        let work_dir = TempDir::new().unwrap();
        let context = test_context(work_dir.path());

        let result = RecentActionsEventsTool::new()
            .execute(args(json!({})), &context)
            .await
            .unwrap();
        let json = response_json(&result);
        assert_eq!(json["events"], json!([]));
        assert_eq!(json["message"], "No events file found");
    }

    #[tokio::test]
    async fn test_default_limit() {
        let work_dir = TempDir::new().unwrap();
        let events: Vec<_> = (0..12).map(|i| json!({"type": "push", "payload": {"n": i}})).collect();
        write_events(work_dir.path(), &json!(events).to_string());
        let context = test_context(work_dir.path());

        let result = RecentActionsEventsTool::new()
            .execute(args(json!({})), &context)
            .await
            .unwrap();
        let json = response_json(&result);
        assert_eq!(json["total_events"], 12);
        assert_eq!(json["showing"], 10);

        let result = RecentActionsEventsTool::new()
            .execute(args(json!({"limit": 2})), &context)
            .await
            .unwrap();
        assert_eq!(response_json(&result)["showing"], 2);
    }

    #[tokio::test]
    async fn test_invalid_json_is_inline_error() {
        let work_dir = TempDir::new().unwrap();
        std::fs::write(work_dir.path().join("github_events.json"), "{oops").unwrap();
        let context = test_context(work_dir.path());

        let result = RecentActionsEventsTool::new()
            .execute(args(json!({})), &context)
            .await
            .unwrap();
        let json = response_json(&result);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON in events file"));
    }

    #[tokio::test]
    async fn test_non_array_log() {
        let work_dir = TempDir::new().unwrap();
        std::fs::write(work_dir.path().join("github_events.json"), "{}").unwrap();
        let context = test_context(work_dir.path());

        let result = RecentActionsEventsTool::new()
            .execute(args(json!({})), &context)
            .await
            .unwrap();
        let json = response_json(&result);
        assert_eq!(json["events"], json!([]));
        assert_eq!(json["total_events"], 0);
    }
}
