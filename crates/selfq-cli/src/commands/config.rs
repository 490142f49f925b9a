use crate::app::{resolve_config_path, AppContext};
use crate::config::{write_config, SelfqConfig};
use crate::errors::CliError;
use crate::ui::{header, kv, receipt, Badge};

pub fn handle_init(app: &AppContext, force: bool) -> anyhow::Result<()> {
    let path = resolve_config_path()?;
    let existed = path.exists();
    if existed && !force {
        return Err(CliError::invalid_input_with_hint(
            format!("Config already exists at {}", path.display()),
            "Pass --force to replace it.",
        )
        .into());
    }

    let config = SelfqConfig::starter();
    write_config(&path, &config)?;

    if !app.quiet() {
        let ui = app.ui_context(false, None);
        println!(
            "{}",
            receipt(
                &ui,
                if existed { Badge::Warn } else { Badge::Ok },
                if existed { "Replaced config" } else { "Wrote config" },
                &[
                    ("Path", path.display().to_string()),
                    ("Default Family", config.export.default_family.clone()),
                ],
            )
        );
    }
    Ok(())
}

pub fn handle_show(app: &AppContext, json: bool) -> anyhow::Result<()> {
    let path = resolve_config_path()?;
    let config = app.config()?;
    let ui = app.ui_context(json, None);

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", header(&ui, "config", None));
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present, using defaults)", path.display())
    };
    println!("{}", kv(&ui, "Path", &source));
    println!("{}", kv(&ui, "Families", &config.family_names().join(", ")));
    println!();
    print!(
        "{}",
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?
    );
    Ok(())
}
