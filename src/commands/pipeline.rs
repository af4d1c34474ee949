//! Fetch → insert → analyze pipeline
//!
//! The store is opened once per run and closed on every path after it was
//! opened. Failures print a diagnostic to the output sink and end the run
//! early; only sink write errors are returned as `Err`.

use reqwest::Client;
use std::io::Write;
use tracing::{error, info};

use super::analytics::{run_analytics, AnalyticsSummary, ReportOptions};
use crate::{
    cheapshark::{build_client, fetch_deals, RawDeal},
    core::Config,
    ingest::prepare_batch,
    storage::DealDatabase,
    Result,
};

/// Which stage ended a run early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    StoreUnavailable,
    FetchFailed,
    InsertFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub inserted: usize,
    pub skipped: usize,
    /// `None` when analytics was not requested or there was nothing to analyze.
    pub analytics: Option<AnalyticsSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Aborted(AbortReason),
    Completed(RunSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub report: ReportOptions,
    /// Run the analytics block after inserting.
    pub analyze: bool,
}

/// Run the pipeline against `config`, writing all console output to `out`.
pub async fn run_pipeline<W: Write>(
    config: &Config,
    client: &Client,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunOutcome> {
    let mut db = match DealDatabase::open(&config.database_path) {
        Ok(db) => {
            writeln!(
                out,
                "Database '{}' and table 'deals' are ready.",
                config.database_path.display()
            )?;
            db
        }
        Err(e) => {
            error!(error = %e, "database initialization failed");
            writeln!(out, "Database error: {}", e)?;
            writeln!(out, "Failed to initialize database. Exiting.")?;
            return Ok(RunOutcome::Aborted(AbortReason::StoreUnavailable));
        }
    };

    let outcome = ingest_and_analyze(&mut db, config, client, options, out).await;

    match db.close() {
        Ok(()) => writeln!(out, "\nDatabase connection closed.")?,
        Err(e) => writeln!(out, "\nFailed to close database: {}", e)?,
    }

    outcome
}

async fn ingest_and_analyze<W: Write>(
    db: &mut DealDatabase,
    config: &Config,
    client: &Client,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunOutcome> {
    let display_url = config
        .endpoint
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|_| config.endpoint.base_url.clone());
    writeln!(out, "Fetching data from API: {}", display_url)?;

    let deals = match fetch_deals(client, &config.endpoint).await {
        Ok(deals) => {
            writeln!(out, "Successfully fetched {} deals.", deals.len())?;
            deals
        }
        Err(e) => {
            error!(error = %e, "fetch failed");
            writeln!(out, "Error fetching data from API: {}", e)?;
            writeln!(
                out,
                "Failed to fetch data from API. Cannot proceed with insertion and analysis."
            )?;
            return Ok(RunOutcome::Aborted(AbortReason::FetchFailed));
        }
    };

    writeln!(out, "\nInserting data into database...")?;
    let Some((inserted, skipped)) = insert_fetched(db, &deals, out)? else {
        return Ok(RunOutcome::Aborted(AbortReason::InsertFailed));
    };
    writeln!(
        out,
        "Data insertion complete. {} new records inserted.",
        inserted
    )?;

    let mut summary = RunSummary {
        inserted,
        skipped,
        analytics: None,
    };
    if !options.analyze {
        return Ok(RunOutcome::Completed(summary));
    }

    let stored = match db.count_deals() {
        Ok(n) => n,
        Err(e) => {
            writeln!(out, "Database error: {}", e)?;
            return Ok(RunOutcome::Aborted(AbortReason::StoreUnavailable));
        }
    };
    if inserted == 0 && stored == 0 {
        writeln!(out, "\nNo data available in the database for analysis.")?;
        return Ok(RunOutcome::Completed(summary));
    }

    summary.analytics = Some(run_analytics(db, out, &options.report)?);
    Ok(RunOutcome::Completed(summary))
}

/// Normalize and store one fetched batch.
///
/// Returns `(inserted, skipped)`, or `None` when the write failed and was
/// rolled back.
fn insert_fetched<W: Write>(
    db: &mut DealDatabase,
    deals: &[RawDeal],
    out: &mut W,
) -> Result<Option<(usize, usize)>> {
    if deals.is_empty() {
        writeln!(out, "No deals data to insert.")?;
        return Ok(Some((0, 0)));
    }

    let batch = prepare_batch(deals);
    for skipped in &batch.skipped {
        writeln!(out, "{}", skipped)?;
    }

    match db.insert_deals(&batch.records) {
        Ok(inserted) => {
            info!(inserted, skipped = batch.skipped.len(), "stored deals");
            writeln!(out, "Successfully inserted {} new deal records.", inserted)?;
            Ok(Some((inserted, batch.skipped.len())))
        }
        Err(e) => {
            error!(error = %e, "insert failed");
            writeln!(out, "Failed to insert deals data: {}", e)?;
            Ok(None)
        }
    }
}

/// Handle the `run` and `fetch` commands, printing to stdout.
pub async fn handle_run(config: Config, options: RunOptions) -> Result<RunOutcome> {
    let client = build_client()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_pipeline(&config, &client, &options, &mut out).await
}
