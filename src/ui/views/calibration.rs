use herbicalib::domain::services::{CalibrationInput, CalibrationResult, FillState};
use herbicalib::domain::value_objects::CalibrationMode;
use herbicalib::infrastructure::export::format_number;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// Rows in the fill chart
pub const CHART_HEIGHT: usize = 10;
const CHART_WIDTH: usize = 8;

fn liters(value: f64) -> String {
    format!("{} L", format_number(value))
}

pub fn render_calibration(
    input: &CalibrationInput,
    result: &CalibrationResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = Icon::Calibrate.render(supports_unicode);
    let mut panel = Panel::with_title(format!("{icon} Calibration ({})", input.mode));
    const W: usize = 16;

    panel.add_row("Capacity", W, liters(input.capacity));
    panel.add_row("Dose ratio", W, format!("{} L/L", format_number(input.dose_ratio)));
    if input.mode != CalibrationMode::PrepareFullBatch {
        panel.add_row(input.mode.known_volume_label(), W, liters(input.known_volume));
    }
    panel.add_empty();

    if result.is_no_work() {
        let status = format!(
            "{} Container already full, no mix needed",
            Icon::Success.render(supports_unicode)
        );
        panel.add_line(ColoredText::success(status).render(supports_color));
        return panel.style(PanelStyle::Success).render(supports_color, supports_unicode);
    }

    panel.add_row("Total mix", W, liters(result.total_mix));
    panel.add_row(
        "Concentrate",
        W,
        ColoredText::info(liters(result.concentrate_volume))
            .bold()
            .render(supports_color),
    );
    panel.add_row(
        "Water",
        W,
        ColoredText::info(liters(result.diluent_volume))
            .bold()
            .render(supports_color),
    );
    panel.render(supports_color, supports_unicode)
}

/// Vertical bar of the jerrycan: filled liters at the bottom, empty above
pub fn render_fill_chart(
    state: &FillState,
    height: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (filled_glyph, empty_glyph) = if supports_unicode {
        (theme::chart::FILLED, theme::chart::EMPTY)
    } else {
        (theme::chart_ascii::FILLED, theme::chart_ascii::EMPTY)
    };
    let height = height.max(1);
    let filled_rows = ((state.fraction_filled() * height as f64).round() as usize).min(height);

    let top_label = liters(state.capacity);
    let label_width = top_label.len().max(3);

    let mut out = String::new();
    for row in 0..height {
        let label = match row {
            0 => top_label.clone(),
            r if r == height - 1 => "0 L".to_string(),
            _ => String::new(),
        };
        let bar = if row >= height - filled_rows {
            ColoredText::success(filled_glyph.repeat(CHART_WIDTH)).render(supports_color)
        } else {
            ColoredText::dim(empty_glyph.repeat(CHART_WIDTH)).render(supports_color)
        };
        out.push_str(&format!("{label:>label_width$} {bar}\n"));
    }
    out.push_str(&format!(
        "{:label_width$} filled {}, empty {}\n",
        "",
        liters(state.filled),
        liters(state.empty)
    ));
    out
}
