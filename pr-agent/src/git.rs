//! Git subprocess access
//!
//! All repository inspection goes through the [`GitRunner`] trait so the
//! change inspector can be exercised against canned output. The production
//! implementation, [`GitOperations`], shells out to the `git` executable and
//! only ever issues read-only commands.

use crate::{PrAgentError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of a finished git process
///
/// A non-zero exit status is an expected outcome (unknown base branch, not a
/// repository) and is reported through `success` rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8
    pub stderr: String,
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, -1 when the process was terminated by a signal
    pub exit_code: i32,
}

impl CommandOutput {
    /// Build a successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            exit_code: 0,
        }
    }

    /// Build a failed output with the given stderr and exit code
    pub fn failed(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            exit_code,
        }
    }

    /// Convert into stdout, turning a non-zero exit into an error
    pub fn into_stdout(self, command: &str) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(PrAgentError::git_command_failed(
                command,
                self.exit_code,
                &self.stderr,
            ))
        }
    }
}

/// Runs git with a fixed working directory
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` and capture its output
    ///
    /// Returns `Err` only when the process could not be started at all.
    fn run(&self, args: &[&str]) -> Result<CommandOutput>;
}

/// Git subprocess runner bound to a working directory
#[derive(Debug, Clone)]
pub struct GitOperations {
    /// Working directory for git operations
    work_dir: PathBuf,
}

impl GitOperations {
    /// Create a git runner for the current directory, verifying it is a repository
    pub fn new() -> Result<Self> {
        let work_dir = std::env::current_dir()?;
        Self::with_work_dir(work_dir)
    }

    /// Create a git runner with an explicit work directory, verifying it is a repository
    pub fn with_work_dir(work_dir: PathBuf) -> Result<Self> {
        Self::verify_git_repo(&work_dir)?;
        Ok(Self { work_dir })
    }

    /// Create a git runner without checking the directory
    ///
    /// Failures then surface per command, which is what the MCP tools want:
    /// a server started outside a repository still answers every call.
    pub fn unchecked(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// The directory git commands run in
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Check whether a directory is inside a git work tree
    pub fn is_git_repo(path: &Path) -> bool {
        Self::verify_git_repo(path).is_ok()
    }

    fn verify_git_repo(path: &Path) -> Result<()> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map_err(|e| PrAgentError::git_operation_failed("check repository", &e.to_string()))?;

        if !output.status.success() {
            return Err(PrAgentError::git_operation_failed(
                "check repository",
                "Not in a git repository",
            ));
        }

        Ok(())
    }
}

impl GitRunner for GitOperations {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!("Running git {} in {}", args.join(" "), self.work_dir.display());

        let output = Command::new("git")
            .current_dir(&self.work_dir)
            .args(args)
            .output()
            .map_err(|e| {
                tracing::error!("Failed to spawn git: {}", e);
                PrAgentError::git_operation_failed(&args.join(" "), &e.to_string())
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if !result.success {
            tracing::warn!(
                "git {} exited with {}: {}",
                args.join(" "),
                result.exit_code,
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}

/// Reject revision strings git would parse as an option
///
/// A base reference such as `--output=/tmp/x` would turn a read-only diff
/// into a file write.
pub fn validate_revision(revision: &str) -> Result<()> {
    let trimmed = revision.trim();
    if trimmed.is_empty() {
        return Err(PrAgentError::git_operation_failed(
            "validate revision",
            "base branch cannot be empty",
        ));
    }
    if trimmed.starts_with('-') {
        return Err(PrAgentError::git_operation_failed(
            "validate revision",
            &format!("'{trimmed}' is not a valid revision"),
        ));
    }
    Ok(())
}
