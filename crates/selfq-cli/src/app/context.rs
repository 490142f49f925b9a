//! Application context for the selfQ CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use once_cell::unsync::OnceCell;

use selfq_core::EnvelopeConfig;

use crate::cli::{Cli, FamilyArgs};
use crate::config::{read_config_or_default, SelfqConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_envelope};

/// Application context that bundles CLI args with the resolved config.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<SelfqConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config, loading it lazily. A missing file yields the defaults.
    pub fn config(&self) -> anyhow::Result<&SelfqConfig> {
        self.config
            .get_or_try_init(|| read_config_or_default(&resolve_config_path()?))
    }

    /// Resolve `--family` / `--tag` into an engine configuration.
    pub fn envelope(&self, family: &FamilyArgs) -> anyhow::Result<EnvelopeConfig> {
        Ok(resolve_envelope(self.config()?, family)?)
    }

    /// Build a UI context honoring the global `--no-color` and `--ascii` flags.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}
