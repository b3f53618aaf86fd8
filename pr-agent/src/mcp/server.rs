//! MCP server exposing the PR agent tools and workflow prompts

use crate::config::Config;
use crate::git::GitOperations;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::path::PathBuf;
use std::sync::Arc;

use super::prompts::{find_prompt, WORKFLOW_PROMPTS};
use super::tool_registry::{ToolContext, ToolRegistry};

const SERVER_NAME: &str = "pr-agent";

const INSTRUCTIONS: &str = "Helps write pull requests. Use analyze_file_changes to see what changed \
against a base branch, get_pr_templates and suggest_template to pick a PR description template, and \
get_recent_actions_events / get_workflow_status to check CI results recorded by the webhook listener.";

/// MCP server for the PR agent tools
///
/// All state is built at construction and shared read-only between
/// concurrent requests.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Components the tools operate on
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server for the repository at `work_dir`
    ///
    /// The server starts even outside a git repository; change analysis
    /// then reports the git failure in its result.
    pub fn new(config: Config, work_dir: PathBuf) -> Self {
        if !GitOperations::is_git_repo(&work_dir) {
            tracing::warn!(
                "{} is not a git repository, change analysis will report errors",
                work_dir.display()
            );
        }
        Self::with_context(ToolContext::from_config(config, work_dir))
    }

    /// Create a server over an already assembled tool context
    pub fn with_context(context: ToolContext) -> Self {
        let tool_registry = ToolRegistry::with_all_tools();
        tracing::debug!("Registered {} tools", tool_registry.len());
        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(context),
        }
    }

    /// The registered tools
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Run a tool by name
    pub async fn call_tool_by_name(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(name) {
            Some(tool) => {
                tracing::info!("Calling tool {}", name);
                tool.execute(arguments, &self.tool_context).await
            }
            None => Err(McpError::invalid_request(
                format!("Unknown tool: {name}"),
                None,
            )),
        }
    }

    /// Fetch a prompt by name
    pub fn prompt(&self, name: &str) -> std::result::Result<GetPromptResult, McpError> {
        find_prompt(name).map(|p| p.to_result()).ok_or_else(|| {
            tracing::warn!("Prompt '{}' not found", name);
            McpError::invalid_request(format!("Prompt '{name}' is not available"), None)
        })
    }

    fn server_info() -> ServerInfo {
        InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            instructions: Some(INSTRUCTIONS.into()),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
        }
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );
        Ok(Self::server_info())
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: WORKFLOW_PROMPTS.iter().map(|p| p.to_prompt()).collect(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        self.prompt(&request.name)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call_tool_by_name(&request.name, request.arguments.unwrap_or_default())
            .await
    }

    fn get_info(&self) -> ServerInfo {
        Self::server_info()
    }
}
