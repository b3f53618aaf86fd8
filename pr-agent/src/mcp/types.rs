//! Argument types for MCP tool calls

use serde::Deserialize;

fn default_include_diff() -> bool {
    true
}

/// Arguments of `analyze_file_changes`
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeFileChangesRequest {
    /// Branch to compare against; the configured base branch when absent
    #[serde(default)]
    pub base_branch: Option<String>,
    /// Whether to include the diff body
    #[serde(default = "default_include_diff")]
    pub include_diff: bool,
    /// Cap the diff at this many lines instead of the character budget
    #[serde(default)]
    pub max_diff_lines: Option<usize>,
}

/// Arguments of `get_pr_templates`
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct GetPrTemplatesRequest {}

/// Arguments of `suggest_template`
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SuggestTemplateRequest {
    /// Free-form description of the changes
    pub changes_summary: String,
    /// Change type such as `bug`, `feature` or `docs`
    pub change_type: String,
}

/// Arguments of `get_recent_actions_events`
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct RecentActionsEventsRequest {
    /// Maximum number of events; the configured default when absent
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Arguments of `get_workflow_status`
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct WorkflowStatusRequest {
    /// Only report this workflow
    #[serde(default)]
    pub workflow_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analyze_defaults() {
        let request: AnalyzeFileChangesRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.base_branch.is_none());
        assert!(request.include_diff);
        assert!(request.max_diff_lines.is_none());
    }

    #[test]
    fn test_suggest_requires_both_fields() {
        assert!(
            serde_json::from_value::<SuggestTemplateRequest>(json!({"change_type": "bug"}))
                .is_err()
        );
    }

    #[test]
    fn test_limit_must_be_non_negative() {
        assert!(serde_json::from_value::<RecentActionsEventsRequest>(json!({"limit": -1})).is_err());
        let request: RecentActionsEventsRequest =
            serde_json::from_value(json!({"limit": 3})).unwrap();
        assert_eq!(request.limit, Some(3));
    }
}
