use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Password};

use herbicalib::HerbicalibError;

use super::Session;
use crate::ui::json::{emit_event, events::DataEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::ledger::render_entries;

/// Credential supplied by the operator, as opposed to the configured secret
pub const CREDENTIAL_ENV: &str = "HERBICALIB_SECRET";

fn resolve_credential(session: &Session, flag: Option<String>) -> Result<Option<String>> {
    if let Some(secret) = flag {
        return Ok(Some(secret));
    }
    if let Some(secret) = std::env::var(CREDENTIAL_ENV).ok().filter(|s| !s.is_empty()) {
        return Ok(Some(secret));
    }
    if !session.ui.can_prompt() {
        return Ok(None);
    }
    let secret = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Delete secret")
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(secret).filter(|s| !s.is_empty()))
}

pub fn cmd_delete(session: &Session, index: usize, secret: Option<String>, yes: bool) -> Result<()> {
    let ledger = session.ledger()?;
    if !ledger.delete_enabled() {
        return Err(HerbicalibError::DeleteDisabled.into());
    }

    let credential = resolve_credential(session, secret)?;
    let ui = &session.ui;

    if !yes && ui.can_prompt() {
        if let Some(entry) = ledger.load_all()?.get(index) {
            print!("{}", render_entries(&[(index, entry.clone())], ui.color));
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete entry #{index}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", ColoredText::dim("Nothing deleted.").render(ui.color));
            return Ok(());
        }
    }

    let removed = ledger.delete_at(index, credential.as_deref())?;

    if ui.json {
        emit_event(&DataEvent::new(
            "delete",
            serde_json::json!({ "index": index, "entry": removed }),
        ))?;
        return Ok(());
    }

    println!(
        "{} Deleted entry #{} ({}, {}){}",
        Icon::Trash.colored(ui.color, ui.unicode),
        index,
        removed.category(),
        removed.timestamp(),
        session.dry_run_note()
    );
    Ok(())
}
