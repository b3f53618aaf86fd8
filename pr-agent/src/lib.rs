//! # PR Agent
//!
//! Pull request helpers for AI assistants, served over the Model Context
//! Protocol.
//!
//! ## Features
//!
//! - **Change inspection**: changed files, diff statistics, commits and a
//!   size-bounded diff of the working tree against a base branch
//! - **PR templates**: list markdown templates and map a change type such as
//!   `bugfix` or `perf` to the right one
//! - **CI events**: read the GitHub Actions event log kept by a webhook
//!   listener and summarize workflow state
//! - **MCP support**: every operation is a named tool on an `rmcp` server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pr_agent::{AnalyzeOptions, ChangeInspector, GitOperations};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let git = GitOperations::new()?;
//! let inspector = ChangeInspector::new(Arc::new(git), 20_000);
//!
//! let changes = inspector.analyze(&AnalyzeOptions::new("main"));
//! for file in &changes.files_changed {
//!     println!("{} {}", file.status, file.filename);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Change inspection and diff truncation
pub mod changes;

/// Shared helpers
pub mod common;

/// Configuration loading
pub mod config;

/// Error types
pub mod error;

/// CI event log access
pub mod events;

/// Git subprocess access
pub mod git;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// PR description templates
pub mod templates;

pub use changes::{AnalyzeOptions, ChangeInspector, ChangeSet, ChangedFile, TruncationPolicy};
pub use config::{Config, ConfigError, TemplateCatalog};
pub use error::{ErrorChainExt, ErrorContext, PrAgentError, Result};
pub use events::{Event, EventBatch, EventLog, EventSource, FileEventSource, WorkflowSummary};
pub use git::{CommandOutput, GitOperations, GitRunner};
pub use templates::{PrTemplate, Resolution, Suggestion, TemplateStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalyzeOptions, ChangeInspector, ChangeSet, Config, EventLog, GitOperations, PrAgentError,
        PrTemplate, Result, TemplateStore,
    };

    pub use crate::mcp::McpServer;
}

#[cfg(test)]
pub(crate) mod test_utils;
