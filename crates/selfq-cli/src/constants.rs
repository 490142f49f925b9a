//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unhandled failure.
    pub const GENERAL: i32 = 1;

    /// Input file or config file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, record or family configuration.
    pub const INVALID_INPUT: i32 = 4;

    /// A layer failed authentication or its password did not match the hint.
    pub const AUTH_FAILED: i32 = 5;

    /// Malformed artifact, layer count mismatch or bad inner payload.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// The artifact belongs to another application or export family.
    pub const SIGNATURE_MISMATCH: i32 = 7;

    /// The artifact declares an unrecognized format version.
    pub const UNSUPPORTED_VERSION: i32 = 8;
}

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SELFQ_CONFIG";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SELFQ_LOG";

/// Argument value that stands for stdin.
pub const STDIN_PATH: &str = "-";
