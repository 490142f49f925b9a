//! Display decisions derived from the terminal and the global flags.

use std::io::IsTerminal;

use super::mode::OutputMode;

const DEFAULT_WIDTH: usize = 80;

/// What the process knows about its terminal at startup.
#[derive(Debug, Clone, Default)]
struct Terminal {
    stdout_tty: bool,
    dumb: bool,
    no_color_env: bool,
    columns: Option<usize>,
}

impl Terminal {
    fn probe() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS")
                .ok()
                .and_then(|cols| cols.trim().parse().ok())
                .filter(|width: &usize| *width > 0),
        }
    }
}

/// Resolved rendering context passed to every renderer.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Columns available for tables.
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Probe the terminal and combine it with `--json`, `--format`,
    /// `--no-color` and `--ascii`.
    pub fn from_env(
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        Self::resolve(
            &Terminal::probe(),
            json_flag,
            format_flag,
            no_color_flag,
            ascii_flag,
        )
    }

    fn resolve(
        terminal: &Terminal,
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        let mode = OutputMode::resolve(json_flag, format_flag, terminal.stdout_tty, terminal.dumb);
        Self {
            is_tty: terminal.stdout_tty,
            color: terminal.stdout_tty && !terminal.dumb && !terminal.no_color_env && !no_color_flag,
            unicode: !ascii_flag,
            width: terminal.columns.unwrap_or(DEFAULT_WIDTH),
            mode,
        }
    }

    /// Prompts need both ends of the conversation on a terminal.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }

    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}
