/// Standard Unix exit codes for the nestmark CLI.
///
/// These codes follow the BSD sysexits convention where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, malformed input files, etc.
pub const USAGE: i32 = 64;
