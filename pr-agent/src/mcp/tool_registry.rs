//! Tool registry for MCP operations
//!
//! Each tool is a small struct implementing [`McpTool`]; the server looks
//! tools up by name instead of matching on request names.

use crate::changes::ChangeInspector;
use crate::config::Config;
use crate::events::{EventLog, FileEventSource};
use crate::git::GitOperations;
use crate::templates::TemplateStore;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Components shared by all tools during execution
///
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct ToolContext {
    /// Git change inspection
    pub inspector: Arc<ChangeInspector>,
    /// PR template lookup
    pub templates: Arc<TemplateStore>,
    /// CI event log queries
    pub events: Arc<EventLog>,
    /// Resolved configuration
    pub config: Arc<Config>,
}

impl ToolContext {
    /// Create a tool context from its parts
    pub fn new(
        inspector: ChangeInspector,
        templates: TemplateStore,
        events: EventLog,
        config: Config,
    ) -> Self {
        Self {
            inspector: Arc::new(inspector),
            templates: Arc::new(templates),
            events: Arc::new(events),
            config: Arc::new(config),
        }
    }

    /// Wire the production components for a repository at `work_dir`
    ///
    /// Relative template and event paths in `config` are taken relative to
    /// `work_dir`.
    pub fn from_config(config: Config, work_dir: PathBuf) -> Self {
        let config = config.resolve_paths(&work_dir);
        let inspector = ChangeInspector::new(
            Arc::new(GitOperations::unchecked(work_dir)),
            config.max_diff_chars,
        );
        let templates = TemplateStore::new(config.templates_dir.clone(), config.template_catalog);
        let events = EventLog::new(Arc::new(FileEventSource::new(config.events_file.clone())));
        Self::new(inspector, templates, events, config)
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry holding every PR agent tool
    pub fn with_all_tools() -> Self {
        let mut registry = Self::new();
        crate::mcp::tools::changes::register_change_tools(&mut registry);
        crate::mcp::tools::templates::register_template_tools(&mut registry);
        crate::mcp::tools::actions::register_actions_tools(&mut registry);
        registry
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names, sorted
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .tools
            .values()
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Common helpers for tool implementations
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// Malformed arguments are the one failure reported as an MCP error.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Wrap a serializable value as a pretty-printed JSON text result
    pub fn create_json_response<T: Serialize>(
        value: &T,
    ) -> std::result::Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(format!("Failed to encode result: {e}"), None))?;
        Ok(CallToolResult {
            content: vec![Annotated::new(RawContent::Text(RawTextContent { text }), None)],
            is_error: Some(false),
        })
    }
}
