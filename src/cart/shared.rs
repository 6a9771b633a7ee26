//! Shared Cart Store
//!
//! A cloneable handle to a [`CartStore`] for consumers that outlive a single
//! call stack. The handle is passed explicitly to each consumer at
//! construction time; there is no ambient global. A single mutex serialises
//! operations, so the store's one-mutation-at-a-time guarantee holds on a
//! multi-threaded runtime too.

use std::sync::{Arc, Mutex, PoisonError};

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartError, CartStore},
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// Cloneable, mutex-guarded handle to a cart store.
#[derive(Debug, Clone)]
pub struct SharedCartStore<'a> {
    inner: Arc<Mutex<CartStore<'a>>>,
}

impl<'a> SharedCartStore<'a> {
    /// Wrap a store in a shared handle.
    #[must_use]
    pub fn new(store: CartStore<'a>) -> Self {
        SharedCartStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Create a shared handle over a new empty cart.
    #[must_use]
    pub fn empty(currency: &'static Currency) -> Self {
        Self::new(CartStore::new(currency))
    }

    /// Add a quantity of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::CurrencyMismatch` if the product's price is in
    /// a different currency than the cart.
    pub fn add(&self, product: &Product<'a>, quantity: u32) -> Result<(), CartError> {
        self.with_store(|store| store.add(product, quantity))
    }

    /// Remove the line for a product. No-op if there is none.
    pub fn remove(&self, product_id: &ProductId) {
        self.with_store(|store| store.remove(product_id));
    }

    /// Set the quantity of an existing line; zero or less removes it.
    pub fn update_quantity(&self, product_id: &ProductId, new_quantity: i64) {
        self.with_store(|store| store.update_quantity(product_id, new_quantity));
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) {
        self.with_store(CartStore::clear);
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.with_cart(Cart::total_items)
    }

    /// Sum of snapshot price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the total overflows minor units.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.with_cart(Cart::total_price)
    }

    /// Run a closure against the cart while holding the lock.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart<'a>) -> R) -> R {
        self.with_store(|store| f(store.cart()))
    }

    /// Run a closure against the store while holding the lock.
    ///
    /// Used for subscription and for grouping several operations into one
    /// critical section.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CartStore<'a>) -> R) -> R {
        // A poisoned lock still yields the data; cart operations keep their
        // invariants even if a panicking observer poisoned the mutex.
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        f(&mut store)
    }
}
