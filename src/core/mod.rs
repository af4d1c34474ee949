//! Core utilities shared by the commands
//!
//! - `config`: endpoint and database path resolution
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::{default_database_path, resolve_database_path, Config, DATABASE_FILE};
pub use logging::init_tracing;
