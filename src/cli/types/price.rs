//! Price bound for the deals query.

use crate::error::{DealsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted bound. Whole amounts below it print exactly as integers.
pub const MAX_UPPER_PRICE: f64 = 1e15;

/// Upper sale-price bound passed to the API as `upperPrice`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpperPrice(pub f64);

impl UpperPrice {
    pub fn new(price: f64) -> Self {
        Self(price)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Default for UpperPrice {
    fn default() -> Self {
        Self(15.0)
    }
}

impl fmt::Display for UpperPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The API takes whole dollars as plain integers
        if self.0.fract() == 0.0 && self.0.abs() < MAX_UPPER_PRICE {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for UpperPrice {
    type Err = DealsError;

    fn from_str(s: &str) -> Result<Self> {
        let price: f64 = s.parse()?;
        if !price.is_finite() || price < 0.0 || price >= MAX_UPPER_PRICE {
            return Err(DealsError::InvalidPrice {
                value: s.to_string(),
                max: MAX_UPPER_PRICE,
            });
        }
        Ok(Self(price))
    }
}
