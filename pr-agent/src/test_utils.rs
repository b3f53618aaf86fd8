//! Shared fixtures for unit tests
//!
//! Repositories are created in temporary directories with a local user
//! identity so commits work on machines without global git config.

use crate::config::Config;
use crate::git::{CommandOutput, GitRunner};
use crate::mcp::tool_registry::ToolContext;
use crate::{PrAgentError, Result};
use rmcp::model::{CallToolResult, RawContent};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()?;
    if !output.status.success() {
        return Err(PrAgentError::Other(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

/// Create a repository with a single commit containing `README.md`
pub(crate) fn create_test_git_repo() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path();

    git(repo_path, &["init"])?;
    git(repo_path, &["config", "user.name", "Test User"])?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "commit.gpgsign", "false"])?;

    fs::write(repo_path.join("README.md"), "# Test Repository")?;
    git(repo_path, &["add", "README.md"])?;
    git(repo_path, &["commit", "-m", "Initial commit"])?;

    Ok(temp_dir)
}

/// Stage everything and commit
pub(crate) fn commit_all(repo_path: &Path, message: &str) {
    git(repo_path, &["add", "-A"]).unwrap();
    git(repo_path, &["commit", "-m", message]).unwrap();
}

/// Write `<name>` files with a small markdown body into `dir`
pub(crate) fn write_templates(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        let stem = name.trim_end_matches(".md");
        fs::write(dir.join(name), format!("## {stem}\n\n- [ ] describe the {stem}\n")).unwrap();
    }
}

/// Write `contents` to `github_events.json` under `dir` and return its path
pub(crate) fn write_events(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("github_events.json");
    fs::write(&path, contents).unwrap();
    path
}

/// Git runner answering from a table keyed by the joined argument list
///
/// Commands missing from the table fail with exit code 1.
#[derive(Default)]
pub(crate) struct MockGitRunner {
    outputs: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl MockGitRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_output(mut self, args: &str, output: CommandOutput) -> Self {
        self.outputs.insert(args.to_string(), output);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl GitRunner for MockGitRunner {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());
        Ok(self
            .outputs
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CommandOutput::failed(format!("unexpected: git {key}"), 1)))
    }
}

/// Tool context over `work_dir` with default configuration
///
/// Templates are read from `<work_dir>/templates` and events from
/// `<work_dir>/github_events.json`.
pub(crate) fn test_context(work_dir: &Path) -> ToolContext {
    ToolContext::from_config(Config::default(), work_dir.to_path_buf())
}

/// Parse the JSON text of a tool result
pub(crate) fn response_json(result: &CallToolResult) -> serde_json::Value {
    match &result.content[0].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
        other => panic!("expected text content, got {other:?}"),
    }
}
