//! Data models for the storage layer

use serde::{Deserialize, Serialize};

/// One typed row of the `deals` table, minus the store-assigned `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub internal_name: Option<String>,
    pub title: Option<String>,
    pub metacritic_link: Option<String>,
    pub deal_id: Option<String>,
    pub store_id: Option<i64>,
    pub game_id: Option<i64>,
    pub sale_price: Option<f64>,
    pub normal_price: Option<f64>,
    pub is_on_sale: Option<i64>,
    pub savings: Option<f64>, // percent off normal price
    pub metacritic_score: Option<i64>,
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: Option<i64>,
    pub steam_rating_count: Option<i64>,
    pub steam_app_id: Option<i64>,
    pub release_date: Option<i64>, // epoch seconds
    pub last_change: Option<i64>,  // epoch seconds
    pub deal_rating: Option<f64>,
    pub thumb: Option<String>,
}

/// A stored deal together with its surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDeal {
    pub id: i64,
    pub record: DealRecord,
}

/// Query 2: `title, savings, salePrice, normalPrice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsRow {
    pub title: Option<String>,
    pub savings: Option<f64>,
    pub sale_price: Option<f64>,
    pub normal_price: Option<f64>,
}

/// Queries 3 and 7: `title, metacriticScore, salePrice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetacriticRow {
    pub title: Option<String>,
    pub metacritic_score: i64,
    pub sale_price: Option<f64>,
}

/// Query 4.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SteamRatedRow {
    pub title: Option<String>,
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: i64,
    pub steam_rating_count: i64,
    pub sale_price: Option<f64>,
}

/// Query 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingTextCount {
    pub steam_rating_text: String,
    pub deals: i64,
}

/// Query 8: a deal rated above the mean of its rating-text category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutlierRow {
    pub title: Option<String>,
    pub steam_rating_text: String,
    pub steam_rating_percent: i64,
    pub category_average: f64,
}

/// Query 9.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BargainRow {
    pub title: Option<String>,
    pub metacritic_score: i64,
    pub steam_rating_percent: i64,
    pub savings: f64,
    pub sale_price: Option<f64>,
}

/// Query 10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewCountRow {
    pub title: Option<String>,
    pub steam_rating_count: i64,
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: Option<i64>,
    pub sale_price: Option<f64>,
}

/// Query 11.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRow {
    pub title: Option<String>,
    pub release_date: i64,
    pub sale_price: Option<f64>,
}
