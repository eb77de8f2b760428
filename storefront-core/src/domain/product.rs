//! Product domain model
//!
//! Mirrors the JSON shape served by the catalog API. The same shape is used
//! when products are persisted into the cart and favorites lists.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A catalog product, read-only from the client's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// Price in the store currency. The API sends a JSON number.
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Average review score and number of reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Case-insensitive substring match on the title
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

fn serialize_price<S>(price: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let value = price
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("price out of range: {}", price)))?;
    serializer.serialize_f64(value)
}

/// Deserialize a price that can be a number or a string
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s,
        _ => return Err(D::Error::custom("expected number or string for price")),
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| D::Error::custom(format!("invalid price: {}", e)))
}
