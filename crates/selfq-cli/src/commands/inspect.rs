use selfq_core::export::artifact::format_timestamp;
use selfq_core::inspect;

use crate::app::AppContext;
use crate::cli::InspectArgs;
use crate::errors::CliError;
use crate::helpers::read_input;
use crate::ui::{header, kv, table, Column};

pub fn handle_inspect(app: &AppContext, args: &InspectArgs) -> anyhow::Result<()> {
    let envelope = app.envelope(&args.family)?;
    let text = read_input(&args.input)?;
    let summary = inspect(&text, &envelope).map_err(CliError::from)?;

    let ui = app.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", header(&ui, "inspect", Some(&args.input)));
    for (key, value) in [
        ("Signature", summary.signature.clone()),
        ("Version", summary.version.clone()),
        ("Layers", summary.layers.to_string()),
        ("Created At", format_timestamp(&summary.created_at)),
        ("Ciphertext Bytes", summary.ciphertext_bytes.to_string()),
    ] {
        println!("{}", kv(&ui, key, &value));
    }

    let rows: Vec<Vec<String>> = summary
        .password_hints
        .iter()
        .enumerate()
        .map(|(round, hint)| vec![round.to_string(), hint.clone()])
        .collect();
    println!(
        "{}",
        table(&ui, &[Column::new("Round"), Column::new("Password Hint")], &rows)
    );
    Ok(())
}
