//! Text rendering for analytical result sets.
//!
//! Two output modes share one [`Table`] model:
//! - [`ReportMode::Table`]: fixed-width columns framed by rule lines
//! - [`ReportMode::Compact`]: one `Header: value` line per row

use crate::error::{DealsError, Result};
use std::fmt;
use std::str::FromStr;


/// Narrowest column the table layout will produce.
pub const MIN_COLUMN_WIDTH: usize = 5;

/// Printed instead of a table when a result set has no rows.
pub const NO_DATA: &str = "No data to display.";

const SEPARATOR: &str = " | ";

/// A single rendered value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Real(f64),
}

impl Cell {
    /// Two-decimal text rendering of an optional real, `NULL` when absent.
    pub fn fixed2(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Text(format!("{:.2}", v)),
            None => Cell::Null,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on integral values
            Cell::Real(r) => write!(f, "{:?}", r),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Real(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// Output style for rendered tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Table,
    Compact,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Table => f.write_str("table"),
            ReportMode::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for ReportMode {
    type Err = DealsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "verbose" => Ok(ReportMode::Table),
            "compact" | "inline" => Ok(ReportMode::Compact),
            _ => Err(DealsError::InvalidReportMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Headers, rows and optional fixed column widths.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    widths: Option<Vec<usize>>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            widths: None,
            rows: Vec::new(),
        }
    }

    /// Fix column widths instead of sizing them from the data.
    pub fn with_widths(mut self, widths: &[usize]) -> Self {
        self.widths = Some(widths.to_vec());
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<Cell>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Effective widths: explicit where given, otherwise the longest of the
    /// header and every cell, never below [`MIN_COLUMN_WIDTH`].
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .chain(self.widths.iter().map(Vec::len))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                let width = match self.widths.as_ref().and_then(|w| w.get(i)) {
                    Some(&fixed) => fixed,
                    None => self.measured_width(i),
                };
                width.max(MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    fn measured_width(&self, column: usize) -> usize {
        let header = self.headers.get(column).map_or(0, |h| h.chars().count());
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.to_string().chars().count())
            .fold(header, usize::max)
    }
}

/// Render a table in the requested mode. Always ends with a newline.
pub fn render(table: &Table, mode: ReportMode) -> String {
    if table.headers.is_empty() {
        return "No headers provided.\n".to_string();
    }
    if table.is_empty() {
        return format!("{NO_DATA}\n");
    }

    match mode {
        ReportMode::Table => render_table(table),
        ReportMode::Compact => render_compact(table),
    }
}

fn render_table(table: &Table) -> String {
    let widths = table.column_widths();
    let rule = "-".repeat(widths.iter().sum::<usize>() + SEPARATOR.len() * (widths.len() - 1) + 2);

    let header_line = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let header = table.headers.get(i).map(String::as_str).unwrap_or("");
            format!("{:<w$}", header)
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in &table.rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let text = row.get(i).map(Cell::to_string).unwrap_or_default();
                let clipped: String = text.chars().take(w).collect();
                format!("{:<w$}", clipped)
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

fn render_compact(table: &Table) -> String {
    let mut out = String::new();
    for row in &table.rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| match table.headers.get(i) {
                Some(header) => format!("{}: {}", header, cell),
                None => cell.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("   ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
