//! Exit codes for the objecthash binary.
//! These codes are part of the public contract; scripts rely on them.

pub const SUCCESS: i32 = 0;
pub const GOLDEN_MISMATCH: i32 = 1; // At least one fixture case did not match
pub const INPUT_ERROR: i32 = 2; // Unreadable input, bad JSON, unhashable value, or usage error
