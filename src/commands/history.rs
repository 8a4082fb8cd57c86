use anyhow::Result;
use serde::Serialize;

use herbicalib::domain::entities::LedgerEntry;
use herbicalib::domain::services::{SummaryKey, SummaryTotals};
use herbicalib::domain::value_objects::Category;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::views::ledger::{render_entries, render_summary};

#[derive(Serialize)]
struct IndexedEntry<'a> {
    index: usize,
    #[serde(flatten)]
    entry: &'a LedgerEntry,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    #[serde(flatten)]
    key: &'a SummaryKey,
    #[serde(flatten)]
    totals: &'a SummaryTotals,
}

pub fn cmd_history(session: &Session, category: Option<Category>) -> Result<()> {
    let entries = session.ledger()?.list(category)?;
    let ui = &session.ui;

    if ui.json {
        let rows: Vec<IndexedEntry<'_>> = entries
            .iter()
            .map(|(index, entry)| IndexedEntry {
                index: *index,
                entry,
            })
            .collect();
        emit_event(&DataEvent::new(
            "history",
            serde_json::json!({ "entries": rows }),
        ))?;
        return Ok(());
    }

    print!("{}", render_entries(&entries, ui.color));
    Ok(())
}

pub fn cmd_summary(session: &Session, category: Option<Category>) -> Result<()> {
    let summary = session.ledger()?.summarize(category)?;
    let ui = &session.ui;

    if ui.json {
        let groups: Vec<SummaryRow<'_>> = summary
            .iter()
            .map(|(key, totals)| SummaryRow { key, totals })
            .collect();
        emit_event(&DataEvent::new(
            "summary",
            serde_json::json!({ "groups": groups }),
        ))?;
        return Ok(());
    }

    print!("{}", render_summary(&summary, ui.color));
    Ok(())
}
