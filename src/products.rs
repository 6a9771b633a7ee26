//! Products

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, de};
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Stable product identifier from the catalog source.
///
/// The source data mixes numeric and string identifiers and compares them
/// after string conversion, so both JSON forms normalise to one string here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = ProductId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or integer product id")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ProductId::new(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ProductId::from(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ProductId::new(value.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Aggregate review summary shown on product detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReviewSummary {
    /// Average star rating.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub count: u32,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Stable identifier within the catalog
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Current unit price
    pub price: Money<'a, Currency>,

    /// Pre-discount price, when the product is on offer
    pub original_price: Option<Money<'a, Currency>>,

    /// Display asset URI
    pub image: String,

    /// Availability flag
    pub in_stock: bool,

    /// Category classification (e.g. "t-shirts")
    pub category: String,

    /// Gender classification used by the category listings
    pub gender: String,

    /// Long-form display text
    pub description: Option<String>,

    /// Size labels offered for this product
    pub sizes: SmallVec<[String; 4]>,

    /// Review summary, when the product has reviews
    pub reviews: Option<ReviewSummary>,
}

impl Product<'_> {
    /// Discount relative to the original price, in whole percent.
    ///
    /// Returns `None` when there is no original price to discount from.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price?;
        let original_minor = original.to_minor_units();

        if original_minor <= 0 {
            return None;
        }

        let price = Decimal::from(self.price.to_minor_units());
        let original = Decimal::from(original_minor);
        let percent = Decimal::ONE_HUNDRED - (price / original) * Decimal::ONE_HUNDRED;

        percent.round_dp(0).to_i64()
    }
}
