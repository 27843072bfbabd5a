//! Terminal output: toasts, field errors, and preference tables.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Style, Term};
use formkit_notify::{NotificationSink, Severity, ToastId};
use formkit_prefs::{CHAMPION_THRESHOLD, HexColor, ShareChannel, ShareProgress, ThemePreferences};
use formkit_submit::FieldError;
use formkit_validate::FieldSpec;

/// Prints each toast as one styled line on stderr.
#[derive(Debug)]
pub struct TerminalSink {
    term: Term,
    next_id: AtomicU64,
}

impl TerminalSink {
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl NotificationSink for TerminalSink {
    fn show(&self, text: &str, severity: Severity, _duration: Duration) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let line = toast_line(text, severity);
        if let Err(error) = self.term.write_line(&line) {
            tracing::debug!(%error, "could not print toast");
        }
        id
    }
}

/// A toast as a single line: a severity marker followed by the text.
pub fn toast_line(text: &str, severity: Severity) -> String {
    let (marker, style) = match severity {
        Severity::Success => ("✔", Style::new().green().bold()),
        Severity::Error => ("✖", Style::new().red().bold()),
        Severity::Info => ("ℹ", Style::new().cyan()),
    };
    format!("{} {}", style.apply_to(marker), text)
}

/// Indented `Label: message` lines for each failed field.
pub fn field_error_lines(fields: &[FieldSpec], errors: &[FieldError]) -> Vec<String> {
    let label_style = Style::new().bold();
    let message_style = Style::new().red();
    errors
        .iter()
        .map(|error| {
            let label = fields
                .iter()
                .find(|field| field.id() == error.field)
                .map_or(error.field.as_str(), FieldSpec::label);
            format!(
                "  {}: {}",
                label_style.apply_to(label),
                message_style.apply_to(&error.message)
            )
        })
        .collect()
}

pub fn theme_table(theme: &ThemePreferences) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Setting"), header_cell("Value"), header_cell("")]);
    for (name, color) in [
        ("primary", &theme.primary),
        ("secondary", &theme.secondary),
        ("accent", &theme.accent),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(color), swatch_cell(color)]);
    }
    table.add_row(vec![Cell::new("mode"), Cell::new(theme.mode.label()), Cell::new("")]);
    table.add_row(vec![
        Cell::new("preset"),
        match theme.preset_name() {
            Some(name) => Cell::new(name),
            None => dim_cell("custom"),
        },
        Cell::new(""),
    ]);
    table
}

pub fn share_table(progress: &ShareProgress) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Channel"), header_cell("Shared")]);
    for channel in ShareChannel::all() {
        let shared = if progress.has_shared(*channel) {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(channel.label()), shared]);
    }
    let status = if progress.champion {
        Cell::new("Champion").fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        Cell::new(format!("{}/{CHAMPION_THRESHOLD}", progress.count))
    };
    table.add_row(vec![
        Cell::new("Progress").add_attribute(Attribute::Bold),
        status,
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::DarkGrey)
}

fn swatch_cell(color: &HexColor) -> Cell {
    let (r, g, b) = color.rgb();
    Cell::new("■■■").fg(Color::Rgb { r, g, b })
}
