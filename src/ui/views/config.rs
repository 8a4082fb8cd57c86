use herbicalib::config::LoadedConfig;
use herbicalib::infrastructure::export::format_number;

use crate::ui::widgets::panel::Panel;

pub fn render_config(loaded: &LoadedConfig, supports_color: bool, supports_unicode: bool) -> String {
    let config = &loaded.config;
    let mut panel = Panel::with_title("Configuration");
    const W: usize = 14;

    let source = loaded
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    panel.add_row("Source", W, source);
    panel.add_empty();
    panel.add_row("Capacity", W, format!("{} L", format_number(config.calibration.capacity_l)));
    panel.add_row("Dose ratio", W, format_number(config.calibration.dose_ratio));
    panel.add_row("Mode", W, config.calibration.mode.as_str());
    panel.add_empty();
    panel.add_row("Ledger", W, config.ledger.backend.to_string());
    panel.add_row("Ledger path", W, config.ledger_path().display().to_string());
    let delete = if config.delete_authorization().is_enabled() {
        "enabled (secret set)"
    } else {
        "disabled"
    };
    panel.add_row("Delete", W, delete);
    panel.add_row("Delimiter", W, config.export.delimiter.to_string());

    panel.render(supports_color, supports_unicode)
}
