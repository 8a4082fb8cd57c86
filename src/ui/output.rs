use herbicalib::config::ConfigWarning;

use crate::ui::json::{emit_event, events::WarningEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

use super::context::UiContext;

fn describe(w: &ConfigWarning) -> String {
    let location = match w.line {
        Some(line) => format!("{}:{}", w.file.display(), line),
        None => w.file.display().to_string(),
    };
    let mut message = format!("Unknown config key '{}' in {}", w.key, location);
    if let Some(suggestion) = &w.suggestion {
        message.push_str(&format!(" (did you mean '{}'?)", suggestion));
    }
    message
}

pub fn print_config_warnings(ui: &UiContext, command: &str, warnings: &[ConfigWarning]) {
    for w in warnings {
        let message = describe(w);
        if ui.json {
            let _ = emit_event(&WarningEvent::new(command, message));
            continue;
        }
        let icon = Icon::Warning.colored(ui.color, ui.unicode);
        eprintln!("{} {}", icon, ColoredText::warning(message).render(ui.color));
    }
}
