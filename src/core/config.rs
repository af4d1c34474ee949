//! Run configuration: where to fetch from and where the store lives.

use std::path::PathBuf;

use crate::{
    cheapshark::{DealsEndpoint, DEALS_BASE_URL},
    cli::types::{StoreId, UpperPrice},
    API_URL_ENV_VAR, DB_PATH_ENV_VAR,
};

/// File name of the SQLite store.
pub const DATABASE_FILE: &str = "cheapshark_deals.db";

/// Everything the pipeline needs from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: DealsEndpoint,
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(endpoint: DealsEndpoint, database_path: impl Into<PathBuf>) -> Self {
        Self {
            endpoint,
            database_path: database_path.into(),
        }
    }

    /// Build a config from CLI values, falling back to env vars and then defaults.
    pub fn resolve(
        endpoint_url: Option<String>,
        database_path: Option<PathBuf>,
        store_id: StoreId,
        upper_price: UpperPrice,
    ) -> Self {
        let base_url = endpoint_url
            .or_else(|| non_empty_env(API_URL_ENV_VAR))
            .unwrap_or_else(|| DEALS_BASE_URL.to_string());

        Self {
            endpoint: DealsEndpoint::new(base_url, store_id, upper_price),
            database_path: resolve_database_path(database_path),
        }
    }
}

/// Database path from the flag, then `CHEAPSHARK_DB_PATH`, then the default.
pub fn resolve_database_path(database_path: Option<PathBuf>) -> PathBuf {
    database_path
        .or_else(|| non_empty_env(DB_PATH_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

/// `<data dir>/cheapshark-deals/cheapshark_deals.db`, or the working directory
/// when the platform has no data dir.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("cheapshark-deals").join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
