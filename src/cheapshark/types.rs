use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One deal object exactly as the API returned it.
///
/// Field values arrive loosely typed (numbers are usually strings), so the
/// payload is kept as a JSON object and typed later by [`crate::ingest`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawDeal(pub Map<String, Value>);

impl RawDeal {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The natural key, if present as a string.
    pub fn deal_id(&self) -> Option<&str> {
        self.get("dealID").and_then(Value::as_str)
    }
}

impl From<Value> for RawDeal {
    /// Non-object values become an empty deal.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawDeal(map),
            _ => RawDeal::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_deal_deserializes_from_object() {
        let deal: RawDeal = serde_json::from_value(json!({
            "dealID": "abc",
            "title": "Portal",
            "salePrice": "1.99"
        }))
        .unwrap();

        assert_eq!(deal.deal_id(), Some("abc"));
        assert_eq!(deal.get("salePrice"), Some(&json!("1.99")));
        assert!(deal.get("thumb").is_none());
    }

    #[test]
    fn test_raw_deal_rejects_non_object() {
        let result = serde_json::from_value::<RawDeal>(json!([1, 2, 3]));
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_deal_from_value() {
        let deal = RawDeal::from(json!({"dealID": 5}));
        // Numeric IDs are not treated as a deal ID string
        assert_eq!(deal.deal_id(), None);
        assert_eq!(RawDeal::from(json!("nope")), RawDeal::default());
    }
}
