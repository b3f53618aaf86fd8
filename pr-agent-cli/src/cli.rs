use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pr-agent")]
#[command(version)]
#[command(about = "An MCP server that helps write pull requests")]
#[command(long_about = "
pr-agent is an MCP (Model Context Protocol) server that inspects the pending
changes in a git repository, suggests pull request description templates and
reports CI results recorded by a GitHub webhook listener.

Every tool the server exposes can also be run directly from the command line;
the result is printed as JSON.

Example usage:
  pr-agent serve                               # Run as MCP server
  pr-agent analyze --base develop              # Changes against develop
  pr-agent templates suggest --summary \"Fix crash\" --type bug
  pr-agent events status --workflow CI
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository to inspect (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Directory of PR templates
    #[arg(long, global = true, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// JSON event log written by the webhook listener
    #[arg(long, global = true, value_name = "FILE")]
    pub events_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs pr-agent as an MCP server on stdin/stdout. Logs go to
~/.pr-agent/mcp.log (file name overridable with PR_AGENT_LOG_FILE) so they
never mix with protocol messages.

Example:
  pr-agent serve
  # Or register it in your assistant's MCP settings
")]
    Serve,
    /// Show how the working tree differs from a base branch
    #[command(long_about = "
Lists changed files, diff statistics, commits and the diff itself.
Large diffs are cut to a character budget, or to --max-diff-lines lines
(500 when the flag has no value).

Examples:
  pr-agent analyze
  pr-agent analyze --base develop --max-diff-lines 200
  pr-agent analyze --no-diff
")]
    Analyze {
        /// Branch or commit to compare against (defaults to the configured base branch)
        #[arg(long)]
        base: Option<String>,
        /// Leave out the diff body
        #[arg(long)]
        no_diff: bool,
        /// Keep only this many diff lines (500 when given without a value)
        #[arg(long, value_name = "LINES")]
        max_diff_lines: Option<Option<usize>>,
    },
    /// List or suggest PR templates
    Templates {
        #[command(subcommand)]
        subcommand: TemplatesCommand,
    },
    /// Query the GitHub Actions event log
    Events {
        #[command(subcommand)]
        subcommand: EventsCommand,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List every template with its content
    List,
    /// Recommend a template for a change type
    Suggest {
        /// What the changes do
        #[arg(long)]
        summary: String,
        /// Kind of change: bug, feature, docs, refactor, test, performance, security
        #[arg(long = "type", value_name = "TYPE")]
        change_type: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// Show the first events in the log
    Recent {
        /// Maximum number of events
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Latest state of each workflow
    Status {
        /// Only this workflow
        #[arg(long)]
        workflow: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration as JSON
    Show,
    /// Print an example pr-agent.yaml
    Example,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}
