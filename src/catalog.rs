//! Catalog
//!
//! The read-only product list backing every listing and detail view. A
//! catalog is built once from a JSON array of product records and never
//! mutated afterwards; all filtering happens on the loaded data.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId, ProductKey, ReviewSummary};

/// Errors related to catalog construction or lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// JSON parsing error
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A product's price could not be expressed in minor units.
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(ProductId, Decimal),

    /// A product's original price is below its current price.
    #[error("Original price for product {0} is below its current price")]
    OriginalPriceBelowPrice(ProductId),

    /// Two records share the same product id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product was not found in the catalog.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
}

/// One product record as served by the catalog source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Stable identifier (number or string in the source data)
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price in major units (e.g. 749.00)
    pub price: Decimal,

    /// Pre-discount price, when on offer
    #[serde(default)]
    pub original_price: Option<Decimal>,

    /// Display asset URI
    pub image: String,

    /// Availability flag
    #[serde(default)]
    pub in_stock: bool,

    /// Category classification
    pub category: String,

    /// Gender classification
    pub gender: String,

    /// Long-form display text
    #[serde(default)]
    pub description: Option<String>,

    /// Size labels offered for this product
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Review summary
    #[serde(default)]
    pub reviews: Option<ReviewSummary>,
}

/// Convert a major-unit decimal amount into minor units.
fn to_minor_units(id: &ProductId, amount: Decimal) -> Result<i64, CatalogError> {
    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(id.clone(), amount));
    }

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(id.clone(), amount))
}

impl ProductRecord {
    fn into_product(self, currency: &'static Currency) -> Result<Product<'static>, CatalogError> {
        let price_minor = to_minor_units(&self.id, self.price)?;

        let original_price = match self.original_price {
            Some(amount) => {
                let original_minor = to_minor_units(&self.id, amount)?;

                if original_minor < price_minor {
                    return Err(CatalogError::OriginalPriceBelowPrice(self.id));
                }

                Some(Money::from_minor(original_minor, currency))
            }
            None => None,
        };

        Ok(Product {
            id: self.id,
            name: self.name,
            price: Money::from_minor(price_minor, currency),
            original_price,
            image: self.image,
            in_stock: self.in_stock,
            category: self.category,
            gender: self.gender,
            description: self.description,
            sizes: SmallVec::from_vec(self.sizes),
            reviews: self.reviews,
        })
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    index: FxHashMap<ProductId, ProductKey>,
    order: Vec<ProductKey>,
    currency: &'static Currency,
}

impl Catalog<'static> {
    /// Build a catalog from a JSON array of product records.
    ///
    /// All prices are denominated in `currency`; the source data carries
    /// bare numeric amounts.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the JSON cannot be parsed, a price is
    /// invalid, or two records share an id.
    pub fn from_json_str(json: &str, currency: &'static Currency) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;

        Self::from_records(records, currency)
    }

    /// Build a catalog from already-parsed product records.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if a price is invalid or two records share
    /// an id.
    pub fn from_records(
        records: Vec<ProductRecord>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut products = SlotMap::with_key();
        let mut index = FxHashMap::default();
        let mut order = Vec::with_capacity(records.len());

        for record in records {
            if index.contains_key(&record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }

            let product = record.into_product(currency)?;
            let id = product.id.clone();
            let key = products.insert(product);

            index.insert(id, key);
            order.push(key);
        }

        debug!(products = order.len(), "catalog loaded");

        Ok(Catalog {
            products,
            index,
            order,
            currency,
        })
    }
}

impl<'a> Catalog<'a> {
    /// Look up a product by its id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if no product has that id.
    pub fn product(&self, id: &ProductId) -> Result<&Product<'a>, CatalogError> {
        self.index
            .get(id)
            .and_then(|key| self.products.get(*key))
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Look up a product by its generated key.
    #[must_use]
    pub fn product_by_key(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get the generated key for a product id.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError::ProductNotFound` if no product has that id.
    pub fn key_of(&self, id: &ProductId) -> Result<ProductKey, CatalogError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// The first `n` products in catalog order, as shown on the home page.
    #[must_use]
    pub fn featured(&self, n: usize) -> Vec<&Product<'a>> {
        self.iter().take(n).collect()
    }

    /// Products with the given gender classification, in catalog order.
    #[must_use]
    pub fn by_gender(&self, gender: &str) -> Vec<&Product<'a>> {
        self.iter()
            .filter(|product| product.gender == gender)
            .collect()
    }

    /// Products with the given category classification, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product<'a>> {
        self.iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Distinct category names in first-seen catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in self.iter() {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get the currency all catalog prices are denominated in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
