//! Boutique prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartLine, CartObserver, CartStore, LineSnapshot, SharedCartStore,
    },
    catalog::{Catalog, CatalogError, ProductRecord},
    fixtures::{Fixture, FixtureError},
    listing::{DEFAULT_PAGE_SIZE, Listing, SortKey},
    pricing::{TotalPriceError, line_total, total_items, total_price},
    products::{Product, ProductId, ProductKey, ReviewSummary},
    receipt::{OrderSummary, SummaryError, SummaryRow},
};
