//! Cart
//!
//! The session-scoped collection of selected products. A cart holds at most
//! one line per product id; line quantities are always positive, and any
//! operation that would drive a quantity to zero removes the line instead.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, total_items, total_price},
    products::{Product, ProductId},
};

pub mod shared;
pub mod store;

pub use shared::SharedCartStore;
pub use store::{CartObserver, CartStore};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Display fields copied from a product when a line is created.
///
/// Prices are captured at add time and never refreshed from the catalog;
/// a catalog price change after the add does not re-price existing lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSnapshot<'a> {
    /// Product name
    pub name: String,

    /// Unit price at add time
    pub price: Money<'a, Currency>,

    /// Pre-discount price at add time, when the product was on offer
    pub original_price: Option<Money<'a, Currency>>,

    /// Display asset URI
    pub image: String,
}

impl<'a> LineSnapshot<'a> {
    /// Capture the display fields of a product.
    #[must_use]
    pub fn of(product: &Product<'a>) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.image.clone(),
        }
    }
}

/// One product-quantity pairing within the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product_id: ProductId,
    snapshot: LineSnapshot<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// The id of the product this line holds.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// The display fields captured when the line was created.
    #[must_use]
    pub fn snapshot(&self) -> &LineSnapshot<'a> {
        &self.snapshot
    }

    /// How many units of the product the line holds. Always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a quantity of a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line is appended with a fresh snapshot of the
    /// product's display fields. Adding zero units is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::CurrencyMismatch` if the product's price is in
    /// a different currency than the cart.
    pub fn add(&mut self, product: &Product<'a>, quantity: u32) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if quantity == 0 {
            return Ok(());
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                snapshot: LineSnapshot::of(product),
                quantity,
            });
        }

        Ok(())
    }

    /// Remove the line for a product. No-op if there is none.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| line.product_id != *product_id);
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. No-op if there is no
    /// line for the product.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove(product_id);
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == *product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine<'a>> {
        self.lines
            .iter()
            .find(|line| line.product_id == *product_id)
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines. Recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        total_items(&self.lines)
    }

    /// Sum of snapshot price times quantity over all lines.
    ///
    /// Recomputed on every call; an empty cart totals zero in the cart
    /// currency.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the total overflows minor units.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.lines, self.currency)
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
