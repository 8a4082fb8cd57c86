use anyhow::Result;
use serde::Serialize;

use herbicalib::domain::services::{calibrate, CalibrationInput, CalibrationResult, FillState};
use herbicalib::domain::value_objects::CalibrationMode;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::views::calibration::{render_calibration, render_fill_chart, CHART_HEIGHT};

#[derive(Serialize)]
struct CalibrationOutput<'a> {
    input: &'a CalibrationInput,
    result: &'a CalibrationResult,
    fill: FillState,
    no_work: bool,
    saved: bool,
}

pub fn cmd_calibrate(
    session: &Session,
    capacity: Option<f64>,
    dose: Option<f64>,
    known: f64,
    mode: Option<CalibrationMode>,
    save: bool,
    no_chart: bool,
) -> Result<()> {
    let defaults = &session.config().calibration;
    let input = CalibrationInput::new(
        capacity.unwrap_or(defaults.capacity_l),
        dose.unwrap_or(defaults.dose_ratio),
        known,
        mode.unwrap_or(defaults.mode),
    );

    let (result, location) = if save {
        let ledger = session.ledger()?;
        let (result, _) = ledger.record_calibration(&input)?;
        (result, Some(ledger.location()))
    } else {
        (calibrate(&input)?, None)
    };
    tracing::info!(
        mode = %input.mode,
        total = result.total_mix,
        saved = location.is_some(),
        "calibrated"
    );

    let fill = FillState::before(&input);
    let ui = &session.ui;

    if ui.json {
        emit_event(&DataEvent::new(
            "calibrate",
            CalibrationOutput {
                input: &input,
                result: &result,
                fill,
                no_work: result.is_no_work(),
                saved: location.is_some() && !session.dry_run,
            },
        ))?;
        return Ok(());
    }

    print!("{}", render_calibration(&input, &result, ui.color, ui.unicode));
    if !no_chart {
        println!();
        print!("{}", render_fill_chart(&fill, CHART_HEIGHT, ui.color, ui.unicode));
    }
    if let Some(location) = location {
        println!(
            "\n{} Saved to {}{}",
            Icon::Success.colored(ui.color, ui.unicode),
            location,
            session.dry_run_note()
        );
    }
    Ok(())
}
