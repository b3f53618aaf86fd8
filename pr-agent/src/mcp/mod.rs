//! Model Context Protocol (MCP) server support
//!
//! Registers the change, template and CI event operations as MCP tools and
//! serves a handful of static workflow prompts.

pub mod prompts;
pub mod server;
pub mod tool_registry;
pub mod tools;
pub mod types;

pub use prompts::{find_prompt, WorkflowPrompt, WORKFLOW_PROMPTS};
pub use server::McpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
pub use types::{
    AnalyzeFileChangesRequest, GetPrTemplatesRequest, RecentActionsEventsRequest,
    SuggestTemplateRequest, WorkflowStatusRequest,
};
