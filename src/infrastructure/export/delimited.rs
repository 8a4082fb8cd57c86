//! Delimited-text export
//!
//! Serializes ledger entries or a summary as a header row followed by one
//! row per entry/group. Cells containing the delimiter, a quote or a line
//! break are quoted, with embedded quotes doubled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::LedgerEntry;
use crate::domain::services::Summary;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Semicolon => "semicolon",
        })
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" | "csv" => Ok(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Ok(Delimiter::Tab),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            other => Err(format!(
                "unsupported delimiter '{}' (use comma, tab or semicolon)",
                other
            )),
        }
    }
}

/// Render a quantity with at most six decimals and no trailing zeros
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

struct RowWriter {
    out: String,
    delimiter: char,
}

impl RowWriter {
    fn new(delimiter: Delimiter) -> Self {
        Self {
            out: String::new(),
            delimiter: delimiter.as_char(),
        }
    }

    fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                self.out.push(self.delimiter);
            }
            self.cell(cell.as_ref());
        }
        self.out.push('\n');
    }

    fn cell(&mut self, value: &str) {
        let needs_quotes = value
            .chars()
            .any(|c| c == self.delimiter || c == '"' || c == '\n' || c == '\r');
        if needs_quotes {
            self.out.push('"');
            self.out.push_str(&value.replace('"', "\"\""));
            self.out.push('"');
        } else {
            self.out.push_str(value);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Union of field names across entries, in first-seen order
fn entry_columns(entries: &[LedgerEntry]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for entry in entries {
        for name in entry.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Entries as delimited text: `timestamp, category, mode`, then fields
pub fn export_entries(entries: &[LedgerEntry], delimiter: Delimiter) -> String {
    let columns = entry_columns(entries);
    let mut writer = RowWriter::new(delimiter);

    let mut header = vec![
        "timestamp".to_string(),
        "category".to_string(),
        "mode".to_string(),
    ];
    header.extend(columns.iter().cloned());
    writer.row(&header);

    for entry in entries {
        let mut row = vec![
            entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            entry.category().to_string(),
            entry.mode().map(|m| m.to_string()).unwrap_or_default(),
        ];
        row.extend(
            columns
                .iter()
                .map(|c| entry.field(c).map(format_number).unwrap_or_default()),
        );
        writer.row(&row);
    }

    writer.finish()
}

/// Summary as delimited text: `date, category, entries`, then summed fields
pub fn export_summary(summary: &Summary, delimiter: Delimiter) -> String {
    let columns = summary.field_names();
    let mut writer = RowWriter::new(delimiter);

    let mut header = vec![
        "date".to_string(),
        "category".to_string(),
        "entries".to_string(),
    ];
    header.extend(columns.iter().cloned());
    writer.row(&header);

    for (key, group) in summary.iter() {
        let mut row = vec![
            key.date.format("%Y-%m-%d").to_string(),
            key.category.to_string(),
            group.entries.to_string(),
        ];
        row.extend(
            columns
                .iter()
                .map(|c| group.totals.get(c).copied().map(format_number).unwrap_or_default()),
        );
        writer.row(&row);
    }

    writer.finish()
}
