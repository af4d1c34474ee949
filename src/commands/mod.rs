//! Command implementations for the deals CLI

pub mod analytics;
pub mod pipeline;
pub mod report;

pub use analytics::{FailurePolicy, ReportOptions};
pub use pipeline::{RunOptions, RunOutcome};
