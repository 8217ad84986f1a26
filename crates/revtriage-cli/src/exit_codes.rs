//! Unified exit codes. Part of the CLI contract: 0 on success, non-zero
//! when any pipeline step fails.

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // pipeline or configuration failure, surfaced on stderr
