//! Database schema and connection management

use crate::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Owner of the single SQLite handle used for a run.
pub struct DealDatabase {
    pub(crate) conn: Connection,
}

impl DealDatabase {
    /// Open (or create) the store at `path` and ensure the `deals` table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        debug!(path = %path.display(), "database ready");
        Ok(db)
    }

    /// In-memory store, mostly for tests.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create the `deals` table if it is missing. Never alters an existing one.
    ///
    /// Runs in a transaction; on failure the transaction is dropped and rolled back.
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS deals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                internalName TEXT,
                title TEXT,
                metacriticLink TEXT,
                dealID TEXT UNIQUE,
                storeID INTEGER,
                gameID INTEGER,
                salePrice REAL,
                normalPrice REAL,
                isOnSale INTEGER,
                savings REAL,
                metacriticScore INTEGER,
                steamRatingText TEXT,
                steamRatingPercent INTEGER,
                steamRatingCount INTEGER,
                steamAppID INTEGER,
                releaseDate INTEGER,
                lastChange INTEGER,
                dealRating REAL,
                thumb TEXT
            )",
            [],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Release the handle, reporting any error from closing it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
