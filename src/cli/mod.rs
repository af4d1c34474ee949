//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{StoreId, UpperPrice};

use crate::{
    commands::{FailurePolicy, ReportOptions},
    report::ReportMode,
};

/// Where the store lives.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// SQLite file (or set `CHEAPSHARK_DB_PATH`).
    #[clap(long)]
    pub db: Option<PathBuf>,

    /// Log progress at info level (overridden by `RUST_LOG`).
    #[clap(long, short)]
    pub verbose: bool,
}

/// How reports are printed.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report layout: `table` or `compact`.
    #[clap(long, default_value_t = ReportMode::default())]
    pub mode: ReportMode,

    /// Keep running the remaining reports when one query fails.
    #[clap(long)]
    pub keep_going: bool,
}

impl ReportArgs {
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            mode: self.mode,
            policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
        }
    }
}

/// Which deals listing to request.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Deals endpoint (or set `CHEAPSHARK_API_URL`).
    #[clap(long)]
    pub endpoint: Option<String>,

    /// CheapShark store ID (1 = Steam).
    #[clap(long, default_value_t = StoreId::default())]
    pub store_id: StoreId,

    /// Only deals at or below this sale price.
    #[clap(long, default_value_t = UpperPrice::default())]
    pub upper_price: UpperPrice,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch deals, store new ones, then print every report.
    Run {
        #[clap(flatten)]
        fetch: FetchArgs,

        #[clap(flatten)]
        store: StoreArgs,

        #[clap(flatten)]
        report: ReportArgs,
    },

    /// Fetch deals and store new ones without printing reports.
    Fetch {
        #[clap(flatten)]
        fetch: FetchArgs,

        #[clap(flatten)]
        store: StoreArgs,
    },

    /// Print every report over the deals already stored.
    Report {
        #[clap(flatten)]
        store: StoreArgs,

        #[clap(flatten)]
        report: ReportArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "cheapshark-deals",
    about = "Fetch CheapShark game deals into SQLite and report on them"
)]
pub struct DealsCli {
    #[clap(subcommand)]
    pub command: Commands,
}

impl DealsCli {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Run { store, .. }
            | Commands::Fetch { store, .. }
            | Commands::Report { store, .. } => store.verbose,
        }
    }
}
