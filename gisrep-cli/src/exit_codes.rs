//! Exit code constants for CLI commands
//!
//! These constants define the standard exit codes used throughout the application:
//! - 0: Success
//! - 1: Runtime failure (API, credential, or IO errors)
//! - 2: User-selection failure (unknown tags, bad flag combinations)

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Runtime failure
pub const EXIT_WARNING: i32 = 1;

/// User-selection failure
pub const EXIT_ERROR: i32 = 2;
