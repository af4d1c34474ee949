//! Report command: analytics over an existing store, no fetch.

use std::io::Write;
use std::path::Path;
use tracing::debug;

use super::analytics::{run_analytics, AnalyticsSummary, ReportOptions};
use crate::{storage::DealDatabase, Result};

/// Print every report for the store at `database_path`.
///
/// Returns `None` when the store is absent, could not be opened, or holds no
/// deals. An absent store is never created.
pub fn report_existing<W: Write>(
    database_path: &Path,
    options: &ReportOptions,
    out: &mut W,
) -> Result<Option<AnalyticsSummary>> {
    if !database_path.exists() {
        debug!(path = %database_path.display(), "no store to report on");
        writeln!(out, "No data available in the database for analysis.")?;
        return Ok(None);
    }

    let db = match DealDatabase::open(database_path) {
        Ok(db) => db,
        Err(e) => {
            writeln!(out, "Database error: {}", e)?;
            writeln!(out, "Failed to initialize database. Exiting.")?;
            return Ok(None);
        }
    };

    let summary = match db.count_deals() {
        Ok(0) => {
            writeln!(out, "No data available in the database for analysis.")?;
            None
        }
        Ok(_) => Some(run_analytics(&db, out, options)),
        Err(e) => {
            writeln!(out, "Database error: {}", e)?;
            None
        }
    };

    match db.close() {
        Ok(()) => writeln!(out, "\nDatabase connection closed.")?,
        Err(e) => writeln!(out, "\nFailed to close database: {}", e)?,
    }

    summary.transpose()
}

/// Handle the `report` command, printing to stdout.
pub fn handle_report(database_path: &Path, options: ReportOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report_existing(database_path, &options, &mut out)?;
    Ok(())
}
