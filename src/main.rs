//! herbicalib CLI
//!
//! Usage: herbicalib <COMMAND>
//!
//! Commands:
//!   calibrate  Compute concentrate and water volumes for a mix
//!   log        Record a usage quantity in the ledger
//!   history    List ledger entries
//!   summary    Totals per day and category
//!   export     Write the ledger as delimited text
//!   delete     Delete an entry (requires the delete secret)
//!   config     Show the resolved configuration

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use herbicalib::config::{Config, Verbosity};
use herbicalib::logging;

use cli::{Cli, Commands};
use commands::Session;
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let command = cli.command.name();
    let json = cli.json;

    if let Err(err) = run(cli) {
        ui::error::print_error(&err, command, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = Config::resolve(cli.config.as_deref())?;

    let verbosity = match cli.verbose {
        0 => loaded.config.output.verbosity,
        1 => Verbosity::Verbose,
        _ => Verbosity::Debug,
    };
    logging::init(verbosity);

    let ui = UiContext::new(cli.json, cli.color, &loaded.config);
    ui::output::print_config_warnings(&ui, cli.command.name(), &loaded.warnings);

    let session = Session::new(loaded, ui, cli.dry_run);

    match cli.command {
        Commands::Calibrate {
            capacity,
            dose,
            known,
            mode,
            save,
            no_chart,
        } => commands::calibrate::cmd_calibrate(
            &session, capacity, dose, known, mode, save, no_chart,
        ),
        Commands::Log { category, quantity } => {
            commands::log::cmd_log(&session, category, quantity)
        }
        Commands::History { category } => commands::history::cmd_history(&session, category),
        Commands::Summary { category } => commands::history::cmd_summary(&session, category),
        Commands::Export {
            view,
            category,
            delimiter,
            output,
        } => commands::export::cmd_export(&session, view.into(), category, delimiter, output),
        Commands::Delete { index, secret, yes } => {
            commands::delete::cmd_delete(&session, index, secret, yes)
        }
        Commands::Config => commands::config::cmd_config(&session),
    }
}
