//! Static workflow prompts served over MCP
//!
//! The prompts take no arguments; their bodies are markdown files embedded
//! at compile time and returned unchanged.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageContent, PromptMessageRole};

/// A named prompt with a fixed body
#[derive(Debug, Clone, Copy)]
pub struct WorkflowPrompt {
    /// Prompt name used in `prompts/get`
    pub name: &'static str,
    /// One-line summary shown in `prompts/list`
    pub description: &'static str,
    /// Markdown body
    pub body: &'static str,
}

/// Every prompt the server offers, in listing order
pub const WORKFLOW_PROMPTS: &[WorkflowPrompt] = &[
    WorkflowPrompt {
        name: "analyze_ci_results",
        description: "Analyze recent CI/CD results and point out failures and patterns",
        body: include_str!("prompts/analyze_ci_results.md"),
    },
    WorkflowPrompt {
        name: "create_deployment_summary",
        description: "Write a deployment summary for team communication",
        body: include_str!("prompts/create_deployment_summary.md"),
    },
    WorkflowPrompt {
        name: "generate_pr_status_report",
        description: "Report on the current pull request, combining code changes and CI results",
        body: include_str!("prompts/generate_pr_status_report.md"),
    },
    WorkflowPrompt {
        name: "troubleshoot_workflow_failure",
        description: "Diagnose a failing GitHub Actions workflow",
        body: include_str!("prompts/troubleshoot_workflow_failure.md"),
    },
];

/// Look up a prompt by name
pub fn find_prompt(name: &str) -> Option<&'static WorkflowPrompt> {
    WORKFLOW_PROMPTS.iter().find(|prompt| prompt.name == name)
}

impl WorkflowPrompt {
    /// Listing entry for `prompts/list`
    pub fn to_prompt(&self) -> Prompt {
        Prompt {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            arguments: None,
        }
    }

    /// Single user message holding the body, for `prompts/get`
    pub fn to_result(&self) -> GetPromptResult {
        GetPromptResult {
            description: Some(self.description.to_string()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::Text {
                    text: self.body.to_string(),
                },
            }],
        }
    }
}
