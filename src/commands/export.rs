use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use herbicalib::application::ExportView;
use herbicalib::domain::value_objects::Category;
use herbicalib::infrastructure::export::Delimiter;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::primitives::icon::Icon;

pub fn cmd_export(
    session: &Session,
    view: ExportView,
    category: Option<Category>,
    delimiter: Option<Delimiter>,
    output: Option<PathBuf>,
) -> Result<()> {
    let delimiter = delimiter.unwrap_or(session.config().export.delimiter);
    let text = session.ledger()?.export(view, category, delimiter)?;
    let rows = text.lines().count().saturating_sub(1);
    let ui = &session.ui;

    let Some(path) = output else {
        if ui.json {
            emit_event(&DataEvent::new(
                "export",
                serde_json::json!({ "rows": rows, "content": text }),
            ))?;
        } else {
            print!("{}", text);
        }
        return Ok(());
    };

    fs::write(&path, &text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows, "exported ledger");

    if ui.json {
        emit_event(&DataEvent::new(
            "export",
            serde_json::json!({ "rows": rows, "path": path }),
        ))?;
    } else {
        println!(
            "{} Exported {} rows to {}",
            Icon::Success.colored(ui.color, ui.unicode),
            rows,
            path.display()
        );
    }
    Ok(())
}
