//! PR Agent CLI Library
//!
//! Command-line definitions, direct tool invocation and exit codes for the
//! `pr-agent` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Running tools and configuration commands
pub mod commands;
/// CLI error type and exit code mapping
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log destination and level selection
pub mod logging;
/// MCP stdio server loop
pub mod serve;
