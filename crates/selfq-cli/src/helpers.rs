//! Input and output plumbing shared by the commands.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::constants::STDIN_PATH;
use crate::errors::CliError;
use crate::ui::UiContext;

/// Read a whole input file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> anyhow::Result<String> {
    if path == STDIN_PATH {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        if buffer.trim().is_empty() {
            return Err(CliError::invalid_input("No input provided on stdin").into());
        }
        return Ok(buffer);
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CliError::not_found(
            format!("No such file: {}", path),
            "Check the path, or pass - to read from stdin.",
        )
        .into()),
        Err(e) => Err(anyhow::anyhow!("Failed to read {}: {}", path, e)),
    }
}

/// Where a command's result went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Stdout,
    File(String),
}

/// Write `contents` to `output`, or to stdout when no path is given.
///
/// An existing file is replaced only with `force` or after an interactive
/// confirmation. File writes are atomic.
pub fn write_output(
    ui: &UiContext,
    output: Option<&str>,
    contents: &str,
    force: bool,
) -> anyhow::Result<Written> {
    let Some(path) = output else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        if !contents.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        return Ok(Written::Stdout);
    };

    if Path::new(path).exists() && !force {
        confirm_overwrite(ui, path)?;
    }

    let mut data = contents.to_string();
    if !data.ends_with('\n') {
        data.push('\n');
    }
    selfq_core::fs::write_atomic(Path::new(path), data.as_bytes()).map_err(CliError::from)?;
    Ok(Written::File(path.to_string()))
}

fn confirm_overwrite(ui: &UiContext, path: &str) -> anyhow::Result<()> {
    if !ui.is_interactive() {
        return Err(CliError::invalid_input_with_hint(
            format!("{} already exists", path),
            "Pass --force to overwrite it.",
        )
        .into());
    }
    let proceed = dialoguer::Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path))
        .default(false)
        .interact()?;
    if !proceed {
        return Err(CliError::invalid_input("Overwrite cancelled").into());
    }
    Ok(())
}
