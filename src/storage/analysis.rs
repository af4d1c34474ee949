//! Read-only analytical queries over the stored deals

use super::{models::*, schema::DealDatabase};
use crate::{DealsError, Result};
use rusqlite::{params, Params, Row};

/// 2015-01-01T00:00:00Z.
pub const RELEASE_CUTOFF_2015: i64 = 1_420_070_400;

/// Minimum review count for the Steam-rated ranking.
pub const MIN_STEAM_REVIEWS: i64 = 1000;

/// Thresholds for the high-rated bargain query.
pub const BARGAIN_MIN_METACRITIC: i64 = 85;
pub const BARGAIN_MIN_STEAM_PERCENT: i64 = 90;
pub const BARGAIN_MIN_SAVINGS: f64 = 70.0;

impl DealDatabase {
    fn query_rows<T, P, F>(&self, name: &'static str, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DealsError::query(name, e))?;
        let rows = stmt
            .query_map(params, f)
            .map_err(|e| DealsError::query(name, e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| DealsError::query(name, e))?);
        }
        Ok(out)
    }

    fn query_value<T, P>(&self, name: &'static str, sql: &str, params: P) -> Result<T>
    where
        P: Params,
        T: rusqlite::types::FromSql,
    {
        self.conn
            .query_row(sql, params, |row| row.get(0))
            .map_err(|e| DealsError::query(name, e))
    }

    /// Query 1: how many deals are stored.
    pub fn count_deals(&self) -> Result<i64> {
        self.query_value("total_deals", "SELECT COUNT(*) FROM deals", [])
    }

    /// Query 2: biggest discounts.
    pub fn top_savings(&self, limit: u32) -> Result<Vec<SavingsRow>> {
        self.query_rows(
            "top_savings",
            "SELECT title, savings, salePrice, normalPrice
             FROM deals
             ORDER BY savings DESC
             LIMIT ?",
            params![limit],
            |row| {
                Ok(SavingsRow {
                    title: row.get(0)?,
                    savings: row.get(1)?,
                    sale_price: row.get(2)?,
                    normal_price: row.get(3)?,
                })
            },
        )
    }

    /// Query 3: best Metacritic scores.
    pub fn top_metacritic(&self, limit: u32) -> Result<Vec<MetacriticRow>> {
        self.query_rows(
            "top_metacritic",
            "SELECT title, metacriticScore, salePrice
             FROM deals
             WHERE metacriticScore IS NOT NULL
             ORDER BY metacriticScore DESC
             LIMIT ?",
            params![limit],
            metacritic_row,
        )
    }

    /// Query 4: best Steam ratings among deals with at least `min_reviews` reviews.
    pub fn top_steam_rated(&self, min_reviews: i64, limit: u32) -> Result<Vec<SteamRatedRow>> {
        self.query_rows(
            "top_steam_rated",
            "SELECT title, steamRatingText, steamRatingPercent, steamRatingCount, salePrice
             FROM deals
             WHERE steamRatingPercent IS NOT NULL
               AND steamRatingCount >= ?
             ORDER BY steamRatingPercent DESC, steamRatingCount DESC
             LIMIT ?",
            params![min_reviews, limit],
            |row| {
                Ok(SteamRatedRow {
                    title: row.get(0)?,
                    steam_rating_text: row.get(1)?,
                    steam_rating_percent: row.get(2)?,
                    steam_rating_count: row.get(3)?,
                    sale_price: row.get(4)?,
                })
            },
        )
    }

    /// Query 5: mean Steam rating percent, `None` when no deal has one.
    pub fn average_steam_rating(&self) -> Result<Option<f64>> {
        self.query_value(
            "average_steam_rating",
            "SELECT AVG(steamRatingPercent) FROM deals WHERE steamRatingPercent IS NOT NULL",
            [],
        )
    }

    /// Query 6: deal count per Steam rating label, most common first.
    pub fn rating_text_counts(&self) -> Result<Vec<RatingTextCount>> {
        self.query_rows(
            "rating_text_counts",
            "SELECT steamRatingText, COUNT(*)
             FROM deals
             WHERE steamRatingText IS NOT NULL
             GROUP BY steamRatingText
             ORDER BY COUNT(*) DESC",
            [],
            |row| {
                Ok(RatingTextCount {
                    steam_rating_text: row.get(0)?,
                    deals: row.get(1)?,
                })
            },
        )
    }

    /// Query 7: deals scoring strictly above the mean Metacritic score.
    pub fn above_average_metacritic(&self, limit: u32) -> Result<Vec<MetacriticRow>> {
        self.query_rows(
            "above_average_metacritic",
            "SELECT title, metacriticScore, salePrice
             FROM deals
             WHERE metacriticScore IS NOT NULL
               AND metacriticScore > (SELECT AVG(metacriticScore) FROM deals
                                      WHERE metacriticScore IS NOT NULL)
             ORDER BY metacriticScore DESC
             LIMIT ?",
            params![limit],
            metacritic_row,
        )
    }

    /// Query 8: deals rated above the mean of their own rating-text category.
    pub fn above_category_steam_average(&self, limit: u32) -> Result<Vec<CategoryOutlierRow>> {
        self.query_rows(
            "above_category_steam_average",
            "WITH category_averages AS (
                 SELECT steamRatingText, AVG(steamRatingPercent) AS avg_percent
                 FROM deals
                 WHERE steamRatingText IS NOT NULL
                 GROUP BY steamRatingText
             )
             SELECT d.title, d.steamRatingText, d.steamRatingPercent, ca.avg_percent
             FROM deals d
             JOIN category_averages ca ON d.steamRatingText = ca.steamRatingText
             WHERE d.steamRatingPercent IS NOT NULL
               AND d.steamRatingPercent > ca.avg_percent
             ORDER BY d.steamRatingPercent DESC
             LIMIT ?",
            params![limit],
            |row| {
                Ok(CategoryOutlierRow {
                    title: row.get(0)?,
                    steam_rating_text: row.get(1)?,
                    steam_rating_percent: row.get(2)?,
                    category_average: row.get(3)?,
                })
            },
        )
    }

    /// Query 9: well-reviewed deals with a deep discount.
    pub fn high_rated_bargains(&self, limit: u32) -> Result<Vec<BargainRow>> {
        self.query_rows(
            "high_rated_bargains",
            "SELECT title, metacriticScore, steamRatingPercent, savings, salePrice
             FROM deals
             WHERE metacriticScore IS NOT NULL AND metacriticScore >= ?
               AND steamRatingPercent IS NOT NULL AND steamRatingPercent >= ?
               AND savings IS NOT NULL AND savings >= ?
             ORDER BY savings DESC, metacriticScore DESC
             LIMIT ?",
            params![
                BARGAIN_MIN_METACRITIC,
                BARGAIN_MIN_STEAM_PERCENT,
                BARGAIN_MIN_SAVINGS,
                limit
            ],
            |row| {
                Ok(BargainRow {
                    title: row.get(0)?,
                    metacritic_score: row.get(1)?,
                    steam_rating_percent: row.get(2)?,
                    savings: row.get(3)?,
                    sale_price: row.get(4)?,
                })
            },
        )
    }

    /// Query 10a: smallest review count inside the top 10% of deals by review count.
    ///
    /// The cutoff rank is `floor(n * 0.1)` over the `n` non-null counts; with
    /// fewer than 10 counts the rank is zero and there is no threshold.
    pub fn top_decile_review_threshold(&self) -> Result<Option<i64>> {
        self.query_value(
            "top_decile_review_threshold",
            "SELECT MIN(steamRatingCount)
             FROM (
                 SELECT steamRatingCount
                 FROM deals
                 WHERE steamRatingCount IS NOT NULL
                 ORDER BY steamRatingCount DESC
                 LIMIT (SELECT CAST(COUNT(*) * 0.1 AS INTEGER) FROM deals
                        WHERE steamRatingCount IS NOT NULL)
             )",
            [],
        )
    }

    /// Query 10b: most-reviewed deals at or above `threshold` reviews.
    pub fn most_reviewed(&self, threshold: i64, limit: u32) -> Result<Vec<ReviewCountRow>> {
        self.query_rows(
            "most_reviewed",
            "SELECT title, steamRatingCount, steamRatingText, steamRatingPercent, salePrice
             FROM deals
             WHERE steamRatingCount IS NOT NULL
               AND steamRatingCount >= ?
             ORDER BY steamRatingCount DESC
             LIMIT ?",
            params![threshold, limit],
            |row| {
                Ok(ReviewCountRow {
                    title: row.get(0)?,
                    steam_rating_count: row.get(1)?,
                    steam_rating_text: row.get(2)?,
                    steam_rating_percent: row.get(3)?,
                    sale_price: row.get(4)?,
                })
            },
        )
    }

    /// Query 11: oldest deals released before `cutoff` (epoch seconds).
    pub fn released_before(&self, cutoff: i64, limit: u32) -> Result<Vec<ReleaseRow>> {
        self.query_rows(
            "released_before",
            "SELECT title, releaseDate, salePrice
             FROM deals
             WHERE releaseDate IS NOT NULL
               AND releaseDate < ?
             ORDER BY releaseDate ASC
             LIMIT ?",
            params![cutoff, limit],
            |row| {
                Ok(ReleaseRow {
                    title: row.get(0)?,
                    release_date: row.get(1)?,
                    sale_price: row.get(2)?,
                })
            },
        )
    }
}

fn metacritic_row(row: &Row<'_>) -> rusqlite::Result<MetacriticRow> {
    Ok(MetacriticRow {
        title: row.get(0)?,
        metacritic_score: row.get(1)?,
        sale_price: row.get(2)?,
    })
}
