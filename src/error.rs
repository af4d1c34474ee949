//! Error types for the CheapShark deals pipeline

use thiserror::Error;


pub type Result<T> = std::result::Result<T, DealsError>;

#[derive(Error, Debug)]
pub enum DealsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed deals payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query '{query}' failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Failed to parse decimal: {0}")]
    InvalidFloat(#[from] std::num::ParseFloatError),

    #[error("Invalid upper price: {value} (expected a finite amount from 0 up to {max})")]
    InvalidPrice { value: String, max: f64 },

    #[error("Invalid report mode: {mode} (expected 'table' or 'compact')")]
    InvalidReportMode { mode: String },
}

impl DealsError {
    /// Wrap a storage error with the name of the analytical query that raised it.
    pub fn query(query: &'static str, source: rusqlite::Error) -> Self {
        DealsError::Query { query, source }
    }

    /// True for the fetch-side failures: transport/HTTP status or a bad body.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, DealsError::Http(_) | DealsError::MalformedPayload(_))
    }
}
