//! Spinner shown while keys are being derived.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::context::UiContext;
use super::theme::spinner_frames;

/// A spinner for indeterminate progress. Draws to stderr, only on a TTY.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create and start a spinner with the given message.
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        let bar = if ctx.allows_animation() {
            let template = if ctx.color {
                "{spinner:.cyan} {msg}..."
            } else {
                "{spinner} {msg}..."
            };
            let style = ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(spinner_frames(ctx.unicode));
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Clear the spinner line; the caller reports the outcome.
    pub fn stop(&self) {
        self.clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}
