use anyhow::Result;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::views::config::render_config;

pub fn cmd_config(session: &Session) -> Result<()> {
    let loaded = &session.loaded;
    let config = &loaded.config;
    let ui = &session.ui;

    if ui.json {
        emit_event(&DataEvent::new(
            "config",
            serde_json::json!({
                "source": loaded.source,
                "calibration": config.calibration,
                "ledger": {
                    "backend": config.ledger.backend,
                    "path": config.ledger_path(),
                },
                "delete_enabled": config.delete_authorization().is_enabled(),
                "export": config.export,
                "output": config.output,
                "warnings": loaded.warnings.len(),
            }),
        ))?;
        return Ok(());
    }

    print!("{}", render_config(loaded, ui.color, ui.unicode));
    Ok(())
}
