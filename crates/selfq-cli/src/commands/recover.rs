use selfq_core::recover;

use crate::app::AppContext;
use crate::cli::RecoverArgs;
use crate::errors::CliError;
use crate::helpers::{read_input, write_output, Written};
use crate::ui::{receipt, Badge, Spinner};

pub fn handle_recover(app: &AppContext, args: &RecoverArgs) -> anyhow::Result<()> {
    let envelope = app.envelope(&args.family)?;
    let text = read_input(&args.input)?;

    let ui = app.ui_context(false, None);
    let spinner = (args.output.is_some() && !app.quiet())
        .then(|| Spinner::start(&ui, "Decrypting"));
    let result = recover(&text, &envelope);
    if let Some(spinner) = &spinner {
        spinner.stop();
    }
    let record = result.map_err(CliError::from)?;
    let json = serde_json::to_string_pretty(&record)?;

    if let Written::File(path) = write_output(&ui, args.output.as_deref(), &json, args.force)? {
        if !app.quiet() {
            println!(
                "{}",
                receipt(
                    &ui,
                    Badge::Ok,
                    "Recovered record",
                    &[("File", path), ("Fields", record.len().to_string())],
                )
            );
        }
    }
    Ok(())
}
