//! Cart Store
//!
//! Wraps a [`Cart`] with observer notification. Every operation applies its
//! mutation and then notifies all subscribed observers synchronously, in
//! subscription order, before returning — consumers re-render from the
//! updated cart without polling.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use tracing::{debug, trace};

use crate::{
    cart::{Cart, CartError, CartLine},
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// Observer notified after each cart operation.
///
/// Observers run synchronously on the mutating call; they must not call
/// back into the store.
pub trait CartObserver: Send {
    /// Called after an operation, with the cart in its new state.
    fn cart_changed(&mut self, cart: &Cart<'_>);
}

/// Cart store: the single mutator of the session cart.
pub struct CartStore<'a> {
    cart: Cart<'a>,
    observers: Vec<Box<dyn CartObserver + 'a>>,
}

impl fmt::Debug for CartStore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<'a> CartStore<'a> {
    /// Create a store over a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        CartStore {
            cart: Cart::new(currency),
            observers: Vec::new(),
        }
    }

    /// Subscribe an observer to all future cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    /// Add a quantity of a product to the cart and notify observers.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::CurrencyMismatch` if the product's price is in
    /// a different currency than the cart; observers are not notified in
    /// that case.
    pub fn add(&mut self, product: &Product<'a>, quantity: u32) -> Result<(), CartError> {
        self.cart.add(product, quantity)?;

        debug!(product = %product.id, quantity, "cart add");
        self.notify();

        Ok(())
    }

    /// Remove the line for a product and notify observers.
    ///
    /// Observers are notified even when there was no line to remove; every
    /// operation is a dispatch.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.cart.remove(product_id);

        debug!(product = %product_id, "cart remove");
        self.notify();
    }

    /// Set the quantity of an existing line and notify observers.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) {
        self.cart.update_quantity(product_id, new_quantity);

        debug!(product = %product_id, new_quantity, "cart update quantity");
        self.notify();
    }

    /// Empty the cart and notify observers.
    pub fn clear(&mut self) {
        self.cart.clear();

        debug!("cart clear");
        self.notify();
    }

    /// The current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine<'a>] {
        self.cart.lines()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of snapshot price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the total overflows minor units.
    pub fn total_price(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.cart.total_price()
    }

    fn notify(&mut self) {
        trace!(observers = self.observers.len(), "notifying cart observers");

        for observer in &mut self.observers {
            observer.cart_changed(&self.cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use rusty_money::iso::INR;
    use smallvec::SmallVec;
    use testresult::TestResult;

    use super::*;

    fn test_product(id: i64, price_minor: i64) -> Product<'static> {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Money::from_minor(price_minor, INR),
            original_price: None,
            image: format!("/images/{id}.jpg"),
            in_stock: true,
            category: "t-shirts".to_string(),
            gender: "men".to_string(),
            description: None,
            sizes: SmallVec::new(),
            reviews: None,
        }
    }

    /// Records how many times it was notified and the last totals it saw.
    struct RecordingObserver {
        notifications: Arc<AtomicU64>,
        last_total_items: Arc<AtomicU64>,
    }

    impl CartObserver for RecordingObserver {
        fn cart_changed(&mut self, cart: &Cart<'_>) {
            self.notifications.fetch_add(1, Ordering::SeqCst);
            self.last_total_items
                .store(cart.total_items(), Ordering::SeqCst);
        }
    }

    fn recording_observer() -> (RecordingObserver, Arc<AtomicU64>, Arc<AtomicU64>) {
        let notifications = Arc::new(AtomicU64::new(0));
        let last_total_items = Arc::new(AtomicU64::new(0));

        let observer = RecordingObserver {
            notifications: Arc::clone(&notifications),
            last_total_items: Arc::clone(&last_total_items),
        };

        (observer, notifications, last_total_items)
    }

    #[test]
    fn every_operation_notifies_observers_once() -> TestResult {
        let mut store = CartStore::new(INR);
        let (observer, notifications, _) = recording_observer();

        store.subscribe(observer);

        store.add(&test_product(1, 10_000), 1)?;
        store.update_quantity(&ProductId::from(1), 3);
        store.remove(&ProductId::from(1));
        store.clear();

        assert_eq!(notifications.load(Ordering::SeqCst), 4);

        Ok(())
    }

    #[test]
    fn observers_see_the_post_mutation_state() -> TestResult {
        let mut store = CartStore::new(INR);
        let (observer, _, last_total_items) = recording_observer();

        store.subscribe(observer);

        store.add(&test_product(1, 10_000), 2)?;

        assert_eq!(last_total_items.load(Ordering::SeqCst), 2);

        store.update_quantity(&ProductId::from(1), 5);

        assert_eq!(last_total_items.load(Ordering::SeqCst), 5);

        Ok(())
    }

    #[test]
    fn no_op_remove_still_notifies() -> TestResult {
        let mut store = CartStore::new(INR);
        let (observer, notifications, _) = recording_observer();

        store.subscribe(observer);

        store.remove(&ProductId::from(404));

        assert_eq!(notifications.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[test]
    fn observers_are_notified_in_subscription_order() -> TestResult {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        struct TaggedObserver {
            tag: u8,
            order: Arc<std::sync::Mutex<Vec<u8>>>,
        }

        impl CartObserver for TaggedObserver {
            fn cart_changed(&mut self, _cart: &Cart<'_>) {
                if let Ok(mut seen) = self.order.lock() {
                    seen.push(self.tag);
                }
            }
        }

        let mut store = CartStore::new(INR);

        store.subscribe(TaggedObserver {
            tag: 1,
            order: Arc::clone(&order),
        });
        store.subscribe(TaggedObserver {
            tag: 2,
            order: Arc::clone(&order),
        });

        store.add(&test_product(1, 10_000), 1)?;

        let seen = order
            .lock()
            .map_err(|_poisoned| "observer order lock poisoned".to_string())?;

        assert_eq!(*seen, vec![1, 2]);

        Ok(())
    }

    #[test]
    fn store_queries_delegate_to_the_cart() -> TestResult {
        let mut store = CartStore::new(INR);

        store.add(&test_product(1, 10_000), 2)?;

        assert_eq!(store.total_items(), 2);
        assert_eq!(store.total_price()?, Money::from_minor(20_000, INR));
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.cart().currency(), INR);

        Ok(())
    }
}
