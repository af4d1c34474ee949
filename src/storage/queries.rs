//! Basic database query operations

use super::{models::*, schema::DealDatabase};
use crate::Result;
use rusqlite::{params, OptionalExtension, Row};

const DEAL_COLUMNS: &str = "internalName, title, metacriticLink, dealID, storeID, gameID,
     salePrice, normalPrice, isOnSale, savings, metacriticScore,
     steamRatingText, steamRatingPercent, steamRatingCount, steamAppID,
     releaseDate, lastChange, dealRating, thumb";

impl DealDatabase {
    /// Insert a batch of deals in one transaction, skipping known `dealID`s.
    ///
    /// Returns the number of rows actually inserted. An empty batch is a no-op.
    /// Any failure rolls back the whole batch.
    pub fn insert_deals(&mut self, deals: &[DealRecord]) -> Result<usize> {
        if deals.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR IGNORE INTO deals ({DEAL_COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))?;

            for deal in deals {
                inserted += stmt.execute(params![
                    deal.internal_name,
                    deal.title,
                    deal.metacritic_link,
                    deal.deal_id,
                    deal.store_id,
                    deal.game_id,
                    deal.sale_price,
                    deal.normal_price,
                    deal.is_on_sale,
                    deal.savings,
                    deal.metacritic_score,
                    deal.steam_rating_text,
                    deal.steam_rating_percent,
                    deal.steam_rating_count,
                    deal.steam_app_id,
                    deal.release_date,
                    deal.last_change,
                    deal.deal_rating,
                    deal.thumb,
                ])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    /// Look up one deal by its natural key.
    pub fn get_deal(&self, deal_id: &str) -> Result<Option<StoredDeal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, {DEAL_COLUMNS} FROM deals WHERE dealID = ?"
        ))?;
        Ok(stmt
            .query_row(params![deal_id], |row| Self::row_to_stored_deal(row))
            .optional()?)
    }

    /// Every stored deal in storage order.
    pub fn all_deals(&self) -> Result<Vec<StoredDeal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, {DEAL_COLUMNS} FROM deals ORDER BY id"))?;

        let rows = stmt.query_map([], |row| Self::row_to_stored_deal(row))?;

        let mut deals = Vec::new();
        for row in rows {
            deals.push(row?);
        }
        Ok(deals)
    }

    fn row_to_stored_deal(row: &Row) -> rusqlite::Result<StoredDeal> {
        Ok(StoredDeal {
            id: row.get(0)?,
            record: DealRecord {
                internal_name: row.get(1)?,
                title: row.get(2)?,
                metacritic_link: row.get(3)?,
                deal_id: row.get(4)?,
                store_id: row.get(5)?,
                game_id: row.get(6)?,
                sale_price: row.get(7)?,
                normal_price: row.get(8)?,
                is_on_sale: row.get(9)?,
                savings: row.get(10)?,
                metacritic_score: row.get(11)?,
                steam_rating_text: row.get(12)?,
                steam_rating_percent: row.get(13)?,
                steam_rating_count: row.get(14)?,
                steam_app_id: row.get(15)?,
                release_date: row.get(16)?,
                last_change: row.get(17)?,
                deal_rating: row.get(18)?,
                thumb: row.get(19)?,
            },
        })
    }
}
