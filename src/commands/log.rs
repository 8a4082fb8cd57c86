use anyhow::Result;

use herbicalib::domain::value_objects::Category;
use herbicalib::infrastructure::export::format_number;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::primitives::icon::Icon;

pub fn cmd_log(session: &Session, category: Category, quantity: f64) -> Result<()> {
    let ledger = session.ledger()?;
    let entry = ledger.record_usage(category, quantity)?;
    tracing::info!(%category, quantity, "logged usage");

    let ui = &session.ui;
    if ui.json {
        emit_event(&DataEvent::new("log", &entry))?;
        return Ok(());
    }

    let unit = category.quantity_field().map_or("", |f| f.unit);
    println!(
        "{} Logged {} {} {}{}",
        Icon::Ledger.colored(ui.color, ui.unicode),
        category.label(),
        format_number(quantity),
        unit,
        session.dry_run_note()
    );
    Ok(())
}
