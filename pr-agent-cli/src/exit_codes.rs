//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: The command ran but the result reports an error
//! - 2: Invalid configuration or the server could not run

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Result carries an inline error
pub const EXIT_WARNING: i32 = 1;

/// Configuration errors or critical failures
pub const EXIT_ERROR: i32 = 2;
