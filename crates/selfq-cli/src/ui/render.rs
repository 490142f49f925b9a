//! Text renderers. Each takes a [`UiContext`] and returns a `String`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// First line of human-readable command output.
///
/// Pretty mode: "selfQ · command" with the subject on the next line.
/// Plain mode: "selfq command".
pub fn header(ctx: &UiContext, command: &str, subject: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("selfQ", styles::bold(), ctx.color);
            let mut out = format!("{} \u{00B7} {}", title, command);
            if let Some(subject) = subject {
                out.push_str(&format!("\n{}", kv(ctx, "File", &shorten(subject, 50))));
            }
            out
        }
        OutputMode::Plain => format!("selfq {}", command),
        OutputMode::Json => String::new(),
    }
}

fn shorten(value: &str, max: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    let tail: String = chars[chars.len() - (max - 3)..].iter().collect();
    format!("...{}", tail)
}

/// Colored badge, followed by `message` when non-empty.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// `Key: value` when pretty, `key=value` (snake_cased key) otherwise.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Follow-up suggestion line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: badge plus indented key-value pairs.
/// Plain mode: `status=` line plus key=value lines.
pub fn receipt(ctx: &UiContext, kind: Badge, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, kind, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        let status = match kind {
            Badge::Ok => "ok",
            Badge::Warn => "warn",
            Badge::Err => "error",
        };
        lines.push(format!("status={}", status));
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Table column heading.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a table.
///
/// Pretty mode: bordered comfy-table
/// Plain mode: space-separated values (no header)
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);
    table.set_header(columns.iter().map(|c| c.header).collect::<Vec<_>>());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Error line plus optional hint, in the current mode.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let head = if ctx.mode.is_pretty() {
        badge(ctx, Badge::Err, message)
    } else {
        format!("error={}", message)
    };
    match error_hint {
        Some(text) => format!("{}\n{}", head, hint(ctx, text)),
        None => head,
    }
}

/// Errors always go to stderr so stdout stays parseable.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
