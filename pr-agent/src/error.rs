//! Unified error handling for the PR Agent library
//!
//! Every fallible operation in the library returns [`PrAgentError`]. Tool
//! implementations never let these escape to the MCP client; they fold them
//! into an inline `error` field of the JSON result instead.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the PR Agent library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrAgentError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A git command ran but exited unsuccessfully
    #[error("Git command '{command}' failed with exit code {exit_code}: {stderr}")]
    GitCommandFailed {
        /// The git arguments that were run
        command: String,
        /// Process exit code, -1 when terminated by a signal
        exit_code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// A git operation could not be performed at all
    #[error("Git {operation} failed: {details}")]
    GitOperationFailed {
        /// Short description of the attempted operation
        operation: String,
        /// Failure details
        details: String,
    },

    /// The configured templates directory does not exist
    #[error("Templates directory not found: {}", .0.display())]
    TemplatesDirNotFound(PathBuf),

    /// A template file could not be found
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// The events log file does not exist
    #[error("No events file found at {}", .0.display())]
    EventsFileNotFound(PathBuf),

    /// The events log file is not valid JSON
    #[error("Invalid JSON in events file: {0}")]
    InvalidEventsJson(#[source] serde_json::Error),

    /// The events log file is valid JSON but not a list of events
    #[error("Invalid events format: {0}")]
    InvalidEventsFormat(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// Context message
        message: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PrAgentError {
    /// Create a git command failure from the command line, exit code and stderr
    pub fn git_command_failed(command: &str, exit_code: i32, stderr: &str) -> Self {
        Self::GitCommandFailed {
            command: command.to_string(),
            exit_code,
            stderr: stderr.trim().to_string(),
        }
    }

    /// Create a git operation failure
    pub fn git_operation_failed(operation: &str, details: &str) -> Self {
        Self::GitOperationFailed {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }
}

/// Result type alias for PR Agent operations
pub type Result<T> = std::result::Result<T, PrAgentError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| PrAgentError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| PrAgentError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl<'a> fmt::Display for ErrorChain<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;

        let mut current = self.0.source();
        while let Some(err) = current {
            write!(f, ": {err}")?;
            current = err.source();
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain on a single line
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "file not found").into());
        let err_with_context = err.context("Failed to read template");

        let msg = err_with_context.unwrap_err().to_string();
        assert!(msg.contains("Failed to read template"));
    }

    #[test]
    fn test_error_chain_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = PrAgentError::Context {
            message: "Failed to read bug.md".to_string(),
            source: Box::new(io_err),
        };

        let chain = err.error_chain().to_string();
        assert_eq!(chain, "Failed to read bug.md: permission denied");
    }

    #[test]
    fn test_git_command_failed_trims_stderr() {
        let err = PrAgentError::git_command_failed(
            "diff --name-status main",
            128,
            "fatal: bad revision 'main'\n",
        );
        assert_eq!(
            err.to_string(),
            "Git command 'diff --name-status main' failed with exit code 128: fatal: bad revision 'main'"
        );
    }

    #[test]
    fn test_templates_dir_not_found_message() {
        let err = PrAgentError::TemplatesDirNotFound(PathBuf::from("/nowhere/templates"));
        assert_eq!(
            err.to_string(),
            "Templates directory not found: /nowhere/templates"
        );
    }
}
