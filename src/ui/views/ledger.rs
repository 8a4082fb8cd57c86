use herbicalib::domain::entities::LedgerEntry;
use herbicalib::domain::services::Summary;
use herbicalib::infrastructure::export::{format_number, TIMESTAMP_FORMAT};

use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::table::{Align, Table};

fn describe_fields(entry: &LedgerEntry) -> String {
    let mut parts: Vec<String> = entry
        .field_names()
        .into_iter()
        .filter_map(|name| entry.field(name).map(|v| format!("{name}={}", format_number(v))))
        .collect();
    if let Some(mode) = entry.mode() {
        parts.insert(0, format!("[{mode}]"));
    }
    parts.join(" ")
}

/// Entries with their ledger index, which `delete` takes
pub fn render_entries(entries: &[(usize, LedgerEntry)], supports_color: bool) -> String {
    if entries.is_empty() {
        return format!("{}\n", ColoredText::dim("No ledger entries.").render(supports_color));
    }

    let mut table = Table::new(["#", "recorded", "category", "fields"]).align(0, Align::Right);
    for (index, entry) in entries {
        table.push(vec![
            index.to_string(),
            entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            entry.category().to_string(),
            describe_fields(entry),
        ]);
    }
    table.render(supports_color)
}

pub fn render_summary(summary: &Summary, supports_color: bool) -> String {
    if summary.is_empty() {
        return format!("{}\n", ColoredText::dim("Nothing to summarize.").render(supports_color));
    }

    let fields = summary.field_names();
    let headers = ["date", "category", "entries"]
        .into_iter()
        .map(str::to_string)
        .chain(fields.iter().cloned());
    let mut table = Table::new(headers);
    for column in 2..3 + fields.len() {
        table = table.align(column, Align::Right);
    }

    for (key, totals) in summary.iter() {
        let mut row = vec![
            key.date.format("%Y-%m-%d").to_string(),
            key.category.to_string(),
            totals.entries.to_string(),
        ];
        row.extend(fields.iter().map(|f| {
            totals
                .totals
                .get(f)
                .map(|v| format_number(*v))
                .unwrap_or_else(|| "-".to_string())
        }));
        table.push(row);
    }
    table.render(supports_color)
}
