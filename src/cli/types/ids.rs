//! ID types for the CheapShark API.

use crate::error::{DealsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for CheapShark store IDs.
///
/// The deals endpoint is always queried for a single store; `1` is Steam.
///
/// # Examples
///
/// ```rust
/// use cheapshark_deals::StoreId;
///
/// let store = StoreId::new(1);
/// assert_eq!(store.as_u32(), 1);
/// assert_eq!(store.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub u32);

impl StoreId {
    /// Create a new StoreId from a u32 value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = DealsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}
