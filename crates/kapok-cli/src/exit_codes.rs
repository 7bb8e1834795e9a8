//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure, bad options file
pub const ERROR: i32 = 1;

/// Template error - chart rendering failed
pub const TEMPLATE_ERROR: i32 = 3;

/// IO error - scratch directory or chart file could not be written
pub const IO_ERROR: i32 = 5;

/// Install error - helm exited non-zero or could not be launched
pub const INSTALL_ERROR: i32 = 6;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
