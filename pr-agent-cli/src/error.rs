//! Error handling for the pr-agent CLI
//!
//! Errors keep their source chain and carry the exit code the process
//! should end with.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Exit code 1: the command ran but reported a problem
    pub fn general<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_WARNING)
    }

    /// Exit code 2: bad configuration or input
    pub fn validation<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    fn cli_general_error(self) -> CliResult<T>;
    fn cli_validation_error(self) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_general_error(self) -> CliResult<T> {
        self.map_err(CliError::general)
    }

    fn cli_validation_error(self) -> CliResult<T> {
        self.map_err(CliError::validation)
    }
}

/// Convert a CliResult carrying an exit code into the process exit code,
/// printing the full error chain on failure
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e.full_chain());
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_full_chain_includes_sources() {
        let inner = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let error = CliError::general(inner);
        assert_eq!(error.exit_code, EXIT_WARNING);
        assert_eq!(error.full_chain(), "no such file");

        let outer = CliError {
            message: "could not load config".into(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(io::Error::other("disk on fire"))),
        };
        assert_eq!(
            outer.full_chain(),
            "could not load config\n  Caused by: disk on fire"
        );
    }

    #[test]
    fn test_handle_cli_result() {
        assert_eq!(handle_cli_result(Ok(EXIT_SUCCESS)), EXIT_SUCCESS);
        assert_eq!(
            handle_cli_result(Err(CliError::new("bad", EXIT_ERROR))),
            EXIT_ERROR
        );
    }

    #[test]
    fn test_validation_error_code() {
        let result: Result<(), io::Error> = Err(io::Error::other("bad value"));
        let error = result.cli_validation_error().unwrap_err();
        assert_eq!(error.exit_code, EXIT_ERROR);
    }
}
