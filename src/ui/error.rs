use herbicalib::HerbicalibError;

use crate::ui::json::{emit_event, events::ErrorEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

fn fix_hint(err: &HerbicalibError) -> Option<String> {
    match err {
        HerbicalibError::DeleteDisabled => Some(
            "Set [auth] delete_secret in herbicalib.toml or export HERBICALIB_DELETE_SECRET."
                .to_string(),
        ),
        HerbicalibError::IndexOutOfRange { len: 0, .. } => {
            Some("The ledger is empty; nothing to delete.".to_string())
        }
        HerbicalibError::IndexOutOfRange { len, .. } => Some(format!(
            "Valid indices are 0..={}; run `herbicalib history` to list them.",
            len - 1
        )),
        HerbicalibError::CorruptStore { path, line, .. } => Some(format!(
            "Repair or remove line {} of {}.",
            line,
            path.display()
        )),
        HerbicalibError::Domain { .. } => Some(
            "Capacity must be positive, dose between 0 and 1, known volume within the capacity."
                .to_string(),
        ),
        _ => None,
    }
}

pub(crate) fn format_error_with(
    err: &anyhow::Error,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = format!("{} ERROR", Icon::Error.render(supports_unicode));
    let mut panel = Panel::with_title(title).style(PanelStyle::Error);
    panel.add_line(ColoredText::error(err.to_string()).render(supports_color));

    if let Some(fix) = err.downcast_ref::<HerbicalibError>().and_then(fix_hint) {
        panel.add_empty();
        panel.add_line(format!("FIX: {}", fix));
    }
    panel.render(supports_color, supports_unicode)
}

pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<HerbicalibError>()
        .map_or("error", HerbicalibError::code)
}

pub fn print_error(err: &anyhow::Error, command: &str, json: bool) {
    if json {
        let _ = emit_event(&ErrorEvent::new(command, error_code(err), err.to_string()));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error_with(err, caps.supports_color, caps.supports_unicode)
    );
}
