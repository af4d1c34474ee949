//! CheapShark Deals Library
//!
//! Fetches game deals from the CheapShark API, stores them in a local SQLite
//! file, and prints a fixed set of analytical reports over everything stored.
//!
//! ## Features
//!
//! - **Deal Fetching**: One request per run for a store and price bound
//! - **Normalization**: Loose API values typed into columns, bad records dropped
//! - **Append-only Storage**: New deals inserted, known `dealID`s ignored
//! - **Analytics**: Eleven ranking and aggregate reports
//! - **Rendering**: Fixed-width tables or compact one-line rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cheapshark_deals::{
//!     commands::{pipeline::handle_run, RunOptions},
//!     core::Config,
//!     StoreId, UpperPrice,
//! };
//!
//! # async fn example() -> cheapshark_deals::Result<()> {
//! let config = Config::resolve(None, None, StoreId::new(1), UpperPrice::new(15.0));
//! let options = RunOptions {
//!     analyze: true,
//!     ..Default::default()
//! };
//!
//! handle_run(config, options).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export CHEAPSHARK_DB_PATH=./cheapshark_deals.db
//! export CHEAPSHARK_API_URL=https://www.cheapshark.com/api/1.0/deals
//! ```

pub mod cheapshark;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod ingest;
pub mod report;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{StoreId, UpperPrice};
pub use error::{DealsError, Result};
pub use storage::{DealDatabase, DealRecord};

pub const API_URL_ENV_VAR: &str = "CHEAPSHARK_API_URL";
pub const DB_PATH_ENV_VAR: &str = "CHEAPSHARK_DB_PATH";
