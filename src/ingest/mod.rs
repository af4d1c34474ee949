//! Typing and validation of raw API deals before they reach the store.
//!
//! Each raw deal yields a [`RecordOutcome`]. Numeric fields follow the
//! upstream truthiness rule: a falsy source value (`0`, `""`, `false`, null,
//! missing) becomes null rather than zero. A truthy value that will not coerce
//! discards the whole record.

use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::{cheapshark::RawDeal, storage::DealRecord};


/// Why a raw deal was not turned into a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// A numeric field held a value that is not a number.
    Coercion { field: &'static str, value: Value },
    /// `dealID` or `title` was missing or falsy.
    MissingField { field: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Coercion { field, value } => {
                write!(f, "cannot convert {field} value {value} to a number")
            }
            SkipReason::MissingField { field } => write!(f, "missing {field}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Ready(DealRecord),
    Skipped(SkipReason),
}

/// A raw deal that was dropped, with enough context to report it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDeal {
    pub index: usize,
    pub deal_id: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedDeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, &self.deal_id) {
            (SkipReason::MissingField { .. }, _) => write!(
                f,
                "Skipping deal #{} due to missing dealID or title ({})",
                self.index, self.reason
            ),
            (SkipReason::Coercion { .. }, Some(id)) => write!(
                f,
                "Error processing deal #{} ({}): {}",
                self.index, id, self.reason
            ),
            (SkipReason::Coercion { .. }, None) => {
                write!(f, "Error processing deal #{}: {}", self.index, self.reason)
            }
        }
    }
}

/// Typed rows ready to insert plus everything that was dropped.
#[derive(Debug, Default)]
pub struct PreparedBatch {
    pub records: Vec<DealRecord>,
    pub skipped: Vec<SkippedDeal>,
}

/// Type every raw deal, keeping the survivors and a diagnostic per drop.
pub fn prepare_batch(deals: &[RawDeal]) -> PreparedBatch {
    let mut batch = PreparedBatch::default();

    for (index, raw) in deals.iter().enumerate() {
        match normalize_deal(raw) {
            RecordOutcome::Ready(record) => batch.records.push(record),
            RecordOutcome::Skipped(reason) => {
                let skipped = SkippedDeal {
                    index,
                    deal_id: raw.deal_id().map(str::to_string),
                    reason,
                };
                warn!("{}", skipped);
                batch.skipped.push(skipped);
            }
        }
    }

    batch
}

/// Type a single raw deal.
pub fn normalize_deal(raw: &RawDeal) -> RecordOutcome {
    match build_record(raw) {
        Ok(record) => match missing_mandatory(raw) {
            Some(field) => RecordOutcome::Skipped(SkipReason::MissingField { field }),
            None => RecordOutcome::Ready(record),
        },
        Err(reason) => RecordOutcome::Skipped(reason),
    }
}

fn build_record(raw: &RawDeal) -> Result<DealRecord, SkipReason> {
    Ok(DealRecord {
        internal_name: text(raw, "internalName"),
        title: text(raw, "title"),
        metacritic_link: text(raw, "metacriticLink"),
        deal_id: text(raw, "dealID"),
        store_id: integer(raw, "storeID")?,
        game_id: integer(raw, "gameID")?,
        sale_price: real(raw, "salePrice")?,
        normal_price: real(raw, "normalPrice")?,
        is_on_sale: integer(raw, "isOnSale")?,
        savings: real(raw, "savings")?,
        metacritic_score: integer(raw, "metacriticScore")?,
        steam_rating_text: text(raw, "steamRatingText"),
        steam_rating_percent: integer(raw, "steamRatingPercent")?,
        steam_rating_count: integer(raw, "steamRatingCount")?,
        steam_app_id: integer(raw, "steamAppID")?,
        release_date: integer(raw, "releaseDate")?,
        last_change: integer(raw, "lastChange")?,
        deal_rating: real(raw, "dealRating")?,
        thumb: text(raw, "thumb"),
    })
}

// Judged on the raw value: `false` or `0` counts as missing
fn missing_mandatory(raw: &RawDeal) -> Option<&'static str> {
    ["dealID", "title"]
        .into_iter()
        .find(|field| raw.get(field).map_or(true, is_falsy))
}

fn text(raw: &RawDeal, field: &str) -> Option<String> {
    match raw.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn integer(raw: &RawDeal, field: &'static str) -> Result<Option<i64>, SkipReason> {
    let value = match raw.get(field) {
        Some(v) if !is_falsy(v) => v,
        _ => return Ok(None),
    };

    let parsed = match value {
        Value::Bool(true) => Some(1),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| SkipReason::Coercion {
        field,
        value: value.clone(),
    })
}

fn real(raw: &RawDeal, field: &'static str) -> Result<Option<f64>, SkipReason> {
    let value = match raw.get(field) {
        Some(v) if !is_falsy(v) => v,
        _ => return Ok(None),
    };

    let parsed = match value {
        Value::Bool(true) => Some(1.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| SkipReason::Coercion {
        field,
        value: value.clone(),
    })
}
