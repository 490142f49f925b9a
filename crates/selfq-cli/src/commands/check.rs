use serde_json::json;

use selfq_core::export::artifact::format_timestamp;
use selfq_core::inspect;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::constants::exit_codes;
use crate::helpers::read_input;
use crate::ui::{receipt, Badge};

/// Structural check only; exits with the integrity code when the file fails.
pub fn handle_check(app: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let envelope = app.envelope(&args.family)?;
    let text = read_input(&args.input)?;
    let ui = app.ui_context(args.json, None);

    match inspect(&text, &envelope) {
        Ok(summary) => {
            if ui.mode.is_json() {
                let report = json!({ "wellFormed": true, "summary": summary });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if !app.quiet() {
                println!(
                    "{}",
                    receipt(
                        &ui,
                        Badge::Ok,
                        "Well-formed",
                        &[
                            ("Signature", summary.signature),
                            ("Layers", summary.layers.to_string()),
                            ("Created At", format_timestamp(&summary.created_at)),
                        ],
                    )
                );
            }
            Ok(())
        }
        Err(err) => {
            if ui.mode.is_json() {
                let report = json!({
                    "wellFormed": false,
                    "kind": format!("{:?}", err.kind()),
                    "reason": err.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if !app.quiet() {
                println!(
                    "{}",
                    receipt(
                        &ui,
                        Badge::Err,
                        "Not well-formed",
                        &[("Reason", err.to_string())],
                    )
                );
            }
            std::process::exit(exit_codes::INTEGRITY_FAILED)
        }
    }
}
