//! Exit codes for the CLI

/// Success
pub const SUCCESS: i32 = 0;

/// Any validation, setup or pipeline failure
pub const ERROR: i32 = 1;
