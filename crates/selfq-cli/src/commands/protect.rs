use serde_json::Value;

use selfq_core::export::artifact::format_timestamp;
use selfq_core::protect;

use crate::app::AppContext;
use crate::cli::ProtectArgs;
use crate::errors::CliError;
use crate::helpers::{read_input, write_output, Written};
use crate::ui::{receipt, Badge, Spinner};

pub fn handle_protect(app: &AppContext, args: &ProtectArgs) -> anyhow::Result<()> {
    let envelope = app.envelope(&args.family)?;
    let text = read_input(&args.input)?;

    let value: Value = serde_json::from_str(&text).map_err(|e| {
        CliError::invalid_input_with_hint(
            format!("{} is not valid JSON: {}", args.input, e),
            "A record is a single JSON object, e.g. {\"title\": \"Day 1\"}.",
        )
    })?;
    let Value::Object(record) = value else {
        return Err(CliError::invalid_input(format!(
            "{} holds JSON but not an object",
            args.input
        ))
        .into());
    };

    let ui = app.ui_context(false, None);
    let spinner = (args.output.is_some() && !app.quiet())
        .then(|| Spinner::start(&ui, "Encrypting"));
    let result = protect(&record, &envelope);
    if let Some(spinner) = &spinner {
        spinner.stop();
    }
    let artifact = result.map_err(CliError::from)?;
    let json = artifact.to_json_pretty().map_err(CliError::from)?;

    if let Written::File(path) = write_output(&ui, args.output.as_deref(), &json, args.force)? {
        if !app.quiet() {
            println!(
                "{}",
                receipt(
                    &ui,
                    Badge::Ok,
                    "Protected record",
                    &[
                        ("File", path),
                        ("Signature", artifact.signature.clone()),
                        ("Layers", artifact.layers.to_string()),
                        ("Created At", format_timestamp(&artifact.created_at)),
                    ],
                )
            );
        }
    }
    Ok(())
}
