//! Output mode routing.

/// How a command formats its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    /// Stable `key=value` text for logs and scripts
    #[default]
    Plain,
    /// Tables, badges and color (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve the mode from flags and environment.
    ///
    /// `--json` and `--format json` are exclusive. `--format plain` and
    /// `TERM=dumb` force plain. Anything else is pretty on a TTY and plain
    /// otherwise, so `--format table` piped to a file still prints plain.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        match (json_flag, format_flag) {
            (true, _) | (false, Some("json")) => Self::Json,
            (false, Some("plain")) => Self::Plain,
            _ if term_is_dumb || !is_tty => Self::Plain,
            _ => Self::Pretty,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_beats_format() {
        assert_eq!(
            OutputMode::resolve(true, Some("plain"), true, false),
            OutputMode::Json
        );
    }

    #[test]
    fn test_format_json() {
        assert_eq!(
            OutputMode::resolve(false, Some("json"), false, false),
            OutputMode::Json
        );
    }

    #[test]
    fn test_plain_on_tty() {
        assert_eq!(
            OutputMode::resolve(false, Some("plain"), true, false),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_dumb_terminal_is_plain() {
        assert_eq!(
            OutputMode::resolve(false, Some("table"), true, true),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_tty_is_pretty_pipe_is_plain() {
        assert_eq!(OutputMode::resolve(false, None, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, None, false, false), OutputMode::Plain);
    }
}
