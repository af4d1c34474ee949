//! Entry point: parse CLI and dispatch to command handlers.

use cheapshark_deals::{
    cli::{Commands, DealsCli, FetchArgs, StoreArgs},
    commands::{pipeline::handle_run, report::handle_report, ReportOptions, RunOptions},
    core::{init_tracing, resolve_database_path, Config},
};
use clap::Parser;

async fn run(fetch: FetchArgs, store: StoreArgs, report: ReportOptions, analyze: bool) -> anyhow::Result<()> {
    let config = Config::resolve(fetch.endpoint, store.db, fetch.store_id, fetch.upper_price);
    let options = RunOptions { report, analyze };
    // Pipeline failures are already reported on stdout
    handle_run(config, options).await?;
    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = DealsCli::parse();
    init_tracing(if app.verbose() { "info" } else { "warn" })?;

    match app.command {
        Commands::Run {
            fetch,
            store,
            report,
        } => run(fetch, store, report.options(), true).await?,

        Commands::Fetch { fetch, store } => run(fetch, store, ReportOptions::default(), false).await?,

        Commands::Report { store, report } => {
            let path = resolve_database_path(store.db);
            handle_report(&path, report.options())?;
        }
    }

    Ok(())
}
