//! Direct invocation of the MCP tools from the command line

use crate::cli::{Cli, Commands, ConfigCommand, EventsCommand, TemplatesCommand};
use crate::error::{CliError, CliResult, IntoCliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use pr_agent::changes::DEFAULT_MAX_DIFF_LINES;
use pr_agent::mcp::McpServer;
use pr_agent::Config;
use rmcp::model::RawContent;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Configuration and repository a command runs against
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub work_dir: PathBuf,
}

impl Settings {
    /// Resolve defaults, environment, `pr-agent.yaml` and command-line flags
    ///
    /// Relative paths given on the command line are taken relative to the
    /// current directory; relative paths from configuration are taken
    /// relative to the work directory.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let cwd = std::env::current_dir().cli_validation_error()?;
        let absolute = |path: &Path| {
            if path.is_relative() {
                cwd.join(path)
            } else {
                path.to_path_buf()
            }
        };

        let work_dir = cli
            .work_dir
            .as_deref()
            .map(absolute)
            .unwrap_or_else(|| cwd.clone());
        if !work_dir.is_dir() {
            return Err(CliError::new(
                format!("Work directory not found: {}", work_dir.display()),
                EXIT_ERROR,
            ));
        }

        let mut config = Config::new();
        if let Some(dir) = cli.templates_dir.as_deref() {
            config.templates_dir = absolute(dir);
        }
        if let Some(file) = cli.events_file.as_deref() {
            config.events_file = absolute(file);
        }
        config.validate().cli_validation_error()?;

        Ok(Self {
            config: config.resolve_paths(&work_dir),
            work_dir,
        })
    }
}

/// Tool name and JSON arguments for a direct command
pub fn tool_call_for(command: &Commands) -> Option<(&'static str, Map<String, Value>)> {
    let (name, arguments) = match command {
        Commands::Analyze {
            base,
            no_diff,
            max_diff_lines,
        } => (
            "analyze_file_changes",
            json!({
                "base_branch": base,
                "include_diff": !no_diff,
                "max_diff_lines": max_diff_lines
                    .map(|lines| lines.unwrap_or(DEFAULT_MAX_DIFF_LINES)),
            }),
        ),
        Commands::Templates { subcommand } => match subcommand {
            TemplatesCommand::List => ("get_pr_templates", json!({})),
            TemplatesCommand::Suggest {
                summary,
                change_type,
            } => (
                "suggest_template",
                json!({ "changes_summary": summary, "change_type": change_type }),
            ),
        },
        Commands::Events { subcommand } => match subcommand {
            EventsCommand::Recent { limit } => ("get_recent_actions_events", json!({ "limit": limit })),
            EventsCommand::Status { workflow } => {
                ("get_workflow_status", json!({ "workflow_name": workflow }))
            }
        },
        Commands::Serve | Commands::Config { .. } => return None,
    };

    // absent options become defaults rather than explicit nulls
    let arguments = match arguments {
        Value::Object(map) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        _ => Map::new(),
    };
    Some((name, arguments))
}

/// Run one tool and print its JSON result
///
/// Exits with [`EXIT_WARNING`] when the result carries an `error` field.
pub async fn run_tool(
    settings: Settings,
    name: &str,
    arguments: Map<String, Value>,
) -> CliResult<i32> {
    let server = McpServer::new(settings.config, settings.work_dir);
    let result = server
        .call_tool_by_name(name, arguments)
        .await
        .map_err(|e| CliError::new(format!("{name} failed: {}", e.message), EXIT_ERROR))?;

    let mut exit_code = EXIT_SUCCESS;
    for content in &result.content {
        if let RawContent::Text(text) = &content.raw {
            println!("{}", text.text);
            if has_inline_error(&text.text) {
                exit_code = EXIT_WARNING;
            }
        }
    }
    Ok(exit_code)
}

fn has_inline_error(text: &str) -> bool {
    serde_json::from_str::<Value>(text)
        .map(|value| value.get("error").is_some())
        .unwrap_or(false)
}

/// Handle `config show` and `config example`
pub fn run_config(subcommand: &ConfigCommand, settings: &Settings) -> CliResult<i32> {
    match subcommand {
        ConfigCommand::Example => {
            print!("{}", Config::example_yaml_config());
        }
        ConfigCommand::Show => {
            let config = &settings.config;
            let shown = json!({
                "work_dir": settings.work_dir,
                "config_file": Config::find_yaml_config_file(),
                "base_branch": config.base_branch,
                "templates_dir": config.templates_dir,
                "template_catalog": config.template_catalog,
                "events_file": config.events_file,
                "max_diff_chars": config.max_diff_chars,
                "default_event_limit": config.default_event_limit,
            });
            let text = serde_json::to_string_pretty(&shown).cli_general_error()?;
            println!("{text}");
        }
    }
    Ok(EXIT_SUCCESS)
}
