//! The fixed battery of analytical reports and the policy for running them.

use chrono::{Local, TimeZone};
use std::io::Write;
use tracing::warn;

use crate::{
    report::{render, Cell, ReportMode, Table},
    storage::{analysis::*, DealDatabase},
    Result,
};

/// What to do when one report's query fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole analytics block at the first failure.
    #[default]
    Abort,
    /// Report the failure for that query and move on.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    pub mode: ReportMode,
    pub policy: FailurePolicy,
}

/// Result of one report, before rendering.
#[derive(Debug, Clone)]
pub enum ReportBody {
    Table(Table),
    /// A single line printed instead of a table.
    Notice(String),
    /// A computed threshold line followed by a table.
    Threshold { notice: String, table: Table },
}

/// A titled report and the query that produces it.
pub struct ReportEntry {
    pub title: &'static str,
    pub build: fn(&DealDatabase) -> Result<ReportBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticsSummary {
    pub completed: usize,
    pub failed: usize,
}

/// All reports, in the order they are printed.
pub const REPORTS: [ReportEntry; 11] = [
    ReportEntry {
        title: "Total number of deals stored",
        build: total_deals,
    },
    ReportEntry {
        title: "Top 5 deals with highest savings",
        build: top_savings,
    },
    ReportEntry {
        title: "Top 5 deals with highest Metacritic Score",
        build: top_metacritic,
    },
    ReportEntry {
        title: "Top 5 deals with highest Steam Rating Percent (min 1000 reviews)",
        build: top_steam_rated,
    },
    ReportEntry {
        title: "Average Steam Rating Percent of all deals",
        build: average_steam_rating,
    },
    ReportEntry {
        title: "Number of deals by Steam Rating Text",
        build: rating_text_counts,
    },
    ReportEntry {
        title: "Deals with Metacritic Score above average",
        build: above_average_metacritic,
    },
    ReportEntry {
        title: "Deals with Steam Rating Percent above average for their rating text category",
        build: above_category_steam_average,
    },
    ReportEntry {
        title: "High-rated deals with significant savings",
        build: high_rated_bargains,
    },
    ReportEntry {
        title: "Deals with Steam Rating Count in the top 10%",
        build: most_reviewed,
    },
    ReportEntry {
        title: "Deals released before 2015",
        build: released_before_2015,
    },
];

/// Run every report in order, writing each to `out`.
///
/// Query failures follow `options.policy`; only write errors are returned.
pub fn run_analytics<W: Write>(
    db: &DealDatabase,
    out: &mut W,
    options: &ReportOptions,
) -> Result<AnalyticsSummary> {
    let mut summary = AnalyticsSummary::default();
    writeln!(out, "\n--- Data Analysis Results ---")?;

    for (index, spec) in REPORTS.iter().enumerate() {
        writeln!(out, "{}. {}:", index + 1, spec.title)?;

        match (spec.build)(db) {
            Ok(body) => {
                write_body(out, &body, options.mode)?;
                summary.completed += 1;
            }
            Err(e) => {
                warn!(report = index + 1, error = %e, "analytics query failed");
                summary.failed += 1;
                match options.policy {
                    FailurePolicy::Abort => {
                        writeln!(out, "Error during data analysis: {}", e)?;
                        break;
                    }
                    FailurePolicy::Continue => {
                        writeln!(out, "   Query failed: {}\n", e)?;
                    }
                }
            }
        }
    }

    Ok(summary)
}

fn write_body<W: Write>(out: &mut W, body: &ReportBody, mode: ReportMode) -> Result<()> {
    match body {
        ReportBody::Table(table) => write_table(out, table, mode)?,
        ReportBody::Notice(line) => writeln!(out, "   {}", line)?,
        ReportBody::Threshold { notice, table } => {
            writeln!(out, "   {}", notice)?;
            write_table(out, table, mode)?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &Table, mode: ReportMode) -> Result<()> {
    out.write_all(render(table, mode).as_bytes())?;
    if !table.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/// Epoch seconds as a local `DD-MM-YYYY` date.
pub fn format_release_date(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%d-%m-%Y").to_string(),
        None => timestamp.to_string(),
    }
}

fn total_deals(db: &DealDatabase) -> Result<ReportBody> {
    let total = db.count_deals()?;
    Ok(ReportBody::Table(
        Table::new(["Total Deals"]).with_rows(vec![vec![Cell::Int(total)]]),
    ))
}

fn top_savings(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .top_savings(5)?
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                r.savings.into(),
                r.sale_price.into(),
                r.normal_price.into(),
            ]
        })
        .collect();
    Ok(ReportBody::Table(
        Table::new(["Title", "Savings (%)", "Sale Price ($)", "Normal Price ($)"])
            .with_widths(&[40, 12, 15, 15])
            .with_rows(rows),
    ))
}

fn top_metacritic(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .top_metacritic(5)?
        .into_iter()
        .map(|r| vec![r.title.into(), r.metacritic_score.into(), r.sale_price.into()])
        .collect();
    Ok(ReportBody::Table(
        Table::new(["Title", "Metacritic Score", "Sale Price ($)"])
            .with_widths(&[40, 18, 15])
            .with_rows(rows),
    ))
}

fn top_steam_rated(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .top_steam_rated(MIN_STEAM_REVIEWS, 5)?
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                r.steam_rating_text.into(),
                r.steam_rating_percent.into(),
                r.steam_rating_count.into(),
                r.sale_price.into(),
            ]
        })
        .collect();
    Ok(ReportBody::Table(
        Table::new([
            "Title",
            "Steam Rating Text",
            "Steam Rating (%)",
            "Steam Reviews",
            "Sale Price ($)",
        ])
        .with_widths(&[40, 20, 18, 15, 15])
        .with_rows(rows),
    ))
}

fn average_steam_rating(db: &DealDatabase) -> Result<ReportBody> {
    Ok(match db.average_steam_rating()? {
        Some(avg) => ReportBody::Table(
            Table::new(["Average Steam Rating (%)"]).with_rows(vec![vec![Cell::fixed2(Some(avg))]]),
        ),
        None => ReportBody::Notice(
            "No Steam Rating Percent data available for average calculation.".to_string(),
        ),
    })
}

fn rating_text_counts(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .rating_text_counts()?
        .into_iter()
        .map(|r| vec![r.steam_rating_text.into(), r.deals.into()])
        .collect();
    Ok(ReportBody::Table(
        Table::new(["Steam Rating Text", "Number of Deals"]).with_rows(rows),
    ))
}

fn above_average_metacritic(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .above_average_metacritic(10)?
        .into_iter()
        .map(|r| vec![r.title.into(), r.metacritic_score.into(), r.sale_price.into()])
        .collect();
    Ok(ReportBody::Table(
        Table::new(["Title", "Metacritic Score", "Sale Price ($)"])
            .with_widths(&[40, 18, 15])
            .with_rows(rows),
    ))
}

fn above_category_steam_average(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .above_category_steam_average(10)?
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                r.steam_rating_text.into(),
                r.steam_rating_percent.into(),
                Cell::fixed2(Some(r.category_average)),
            ]
        })
        .collect();
    Ok(ReportBody::Table(
        Table::new([
            "Title",
            "Steam Rating Text",
            "Steam Rating (%)",
            "Avg for Category (%)",
        ])
        .with_widths(&[40, 20, 18, 20])
        .with_rows(rows),
    ))
}

fn high_rated_bargains(db: &DealDatabase) -> Result<ReportBody> {
    let rows: Vec<Vec<Cell>> = db
        .high_rated_bargains(10)?
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                r.metacritic_score.into(),
                r.steam_rating_percent.into(),
                Cell::fixed2(Some(r.savings)),
                Cell::fixed2(r.sale_price),
            ]
        })
        .collect();
    Ok(ReportBody::Table(
        Table::new([
            "Title",
            "Meta Score",
            "Steam (%)",
            "Savings (%)",
            "Sale Price ($)",
        ])
        .with_widths(&[40, 12, 12, 12, 15])
        .with_rows(rows),
    ))
}

fn most_reviewed(db: &DealDatabase) -> Result<ReportBody> {
    let Some(threshold) = db.top_decile_review_threshold()? else {
        return Ok(ReportBody::Notice(
            "Not enough data to calculate top 10% review count.".to_string(),
        ));
    };

    let rows: Vec<Vec<Cell>> = db
        .most_reviewed(threshold, 10)?
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                r.steam_rating_count.into(),
                r.steam_rating_text.into(),
                Cell::fixed2(r.steam_rating_percent.map(|p| p as f64)),
                Cell::fixed2(r.sale_price),
            ]
        })
        .collect();
    Ok(ReportBody::Threshold {
        notice: format!("Minimum review count for top 10%: {}", threshold),
        table: Table::new([
            "Title",
            "Reviews",
            "Steam Rating Text",
            "Steam Rating (%)",
            "Sale Price ($)",
        ])
        .with_widths(&[40, 10, 20, 18, 15])
        .with_rows(rows),
    })
}

fn released_before_2015(db: &DealDatabase) -> Result<ReportBody> {
    let rows = db.released_before(RELEASE_CUTOFF_2015, 10)?;
    if rows.is_empty() {
        return Ok(ReportBody::Notice(
            "No deals found released before 2015.".to_string(),
        ));
    }

    let rows: Vec<Vec<Cell>> = rows
        .into_iter()
        .map(|r| {
            vec![
                r.title.into(),
                format_release_date(r.release_date).into(),
                Cell::fixed2(r.sale_price),
            ]
        })
        .collect();
    Ok(ReportBody::Table(
        Table::new(["Title", "Release Date", "Sale Price ($)"])
            .with_widths(&[40, 15, 15])
            .with_rows(rows),
    ))
}
