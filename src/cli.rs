use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use herbicalib::application::ExportView;
use herbicalib::domain::value_objects::{CalibrationMode, Category};
use herbicalib::infrastructure::export::Delimiter;

/// Herbicalib - jerrycan herbicide calibration and field usage ledger
#[derive(Parser, Debug)]
#[command(name = "herbicalib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Configuration file (default: ./herbicalib.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run against an in-memory copy of the ledger; nothing is written
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Entries,
    Summary,
}

impl From<ViewArg> for ExportView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Entries => ExportView::Entries,
            ViewArg::Summary => ExportView::Summary,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute concentrate and water volumes for a mix
    Calibrate {
        /// Jerrycan capacity in liters [default: from config]
        #[arg(long, value_name = "LITERS")]
        capacity: Option<f64>,

        /// Concentrate liters per liter of mix [default: from config]
        #[arg(long, value_name = "RATIO")]
        dose: Option<f64>,

        /// Current fill, volume used, or target mix, depending on --mode
        #[arg(long, value_name = "LITERS", default_value_t = 0.0)]
        known: f64,

        /// fill-to-capacity, refill-remaining, prepare-full-batch or target-total-mix
        #[arg(short, long)]
        mode: Option<CalibrationMode>,

        /// Append the result to the ledger
        #[arg(short, long)]
        save: bool,

        /// Skip the fill chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Record a usage quantity in the ledger
    Log {
        /// pesticide (liters), fertilizer (kg) or containers (count)
        category: Category,

        quantity: f64,
    },

    /// List ledger entries with their index
    History {
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Totals per day and category
    Summary {
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Write the ledger or its summary as delimited text
    Export {
        #[arg(long, value_enum, default_value = "entries")]
        view: ViewArg,

        #[arg(short, long)]
        category: Option<Category>,

        /// comma, tab or semicolon [default: from config]
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete the entry at INDEX (requires the delete secret)
    Delete {
        index: usize,

        /// Delete secret (default: HERBICALIB_SECRET, then a prompt)
        #[arg(long)]
        secret: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the resolved configuration
    Config,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Calibrate { .. } => "calibrate",
            Commands::Log { .. } => "log",
            Commands::History { .. } => "history",
            Commands::Summary { .. } => "summary",
            Commands::Export { .. } => "export",
            Commands::Delete { .. } => "delete",
            Commands::Config => "config",
        }
    }
}
