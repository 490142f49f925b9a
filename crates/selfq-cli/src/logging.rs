//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive.
///
/// Precedence: `SELFQ_LOG`, then `-q` / `-v` flags, then the config file level.
pub fn resolve_directive(
    env_value: Option<&str>,
    quiet: bool,
    verbose: u8,
    config_level: Option<&str>,
) -> String {
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return value.to_string();
    }
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => config_level
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_LEVEL)
            .to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(quiet: bool, verbose: u8, config_level: Option<&str>) {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = resolve_directive(env_value.as_deref(), quiet, verbose, config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
