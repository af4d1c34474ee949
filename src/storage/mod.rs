//! Storage layer for the deals pipeline
//!
//! This module wraps the SQLite store, organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Inserts and lookups
//! - `analysis`: The fixed analytical queries

pub mod analysis;
pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::DealDatabase;
