//! Listings
//!
//! The stateless transform behind category pages: a filtered product view
//! with a price sort and fixed-size pagination. The view is recomputed from
//! the base set on every input change; changing the sort key or replacing
//! the product set resets pagination to the first page.

use crate::products::Product;

/// Number of products per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Sort applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,

    /// Ascending by price; ties keep catalog order.
    PriceLowToHigh,

    /// Descending by price; ties keep catalog order.
    PriceHighToLow,
}

/// Listing state for one category page.
#[derive(Debug)]
pub struct Listing<'a> {
    /// Base set in catalog order; restored by `SortKey::Default`.
    products: Vec<&'a Product<'a>>,

    /// Current view: base set with the sort applied.
    view: Vec<&'a Product<'a>>,

    sort: SortKey,
    page: usize,
    page_size: usize,
}

impl<'a> Listing<'a> {
    /// Create a listing over a filtered product set with the default page
    /// size.
    #[must_use]
    pub fn new(products: Vec<&'a Product<'a>>) -> Self {
        Self::with_page_size(products, DEFAULT_PAGE_SIZE)
    }

    /// Create a listing with a custom page size. A zero page size is lifted
    /// to 1.
    #[must_use]
    pub fn with_page_size(products: Vec<&'a Product<'a>>, page_size: usize) -> Self {
        let view = products.clone();

        Listing {
            products,
            view,
            sort: SortKey::Default,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Apply a sort key and reset to the first page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
        self.apply_sort();
    }

    /// Replace the base product set, re-apply the current sort, and reset
    /// to the first page.
    pub fn set_products(&mut self, products: Vec<&'a Product<'a>>) {
        self.products = products;
        self.page = 1;
        self.apply_sort();
    }

    /// Select a page. Pages are 1-based; a page past the end yields an
    /// empty view rather than clamping.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    fn apply_sort(&mut self) {
        self.view = self.products.clone();

        match self.sort {
            SortKey::Default => {}
            SortKey::PriceLowToHigh => {
                // Stable sort; equal prices keep catalog order.
                self.view.sort_by_key(|product| product.price.to_minor_units());
            }
            SortKey::PriceHighToLow => {
                self.view
                    .sort_by_key(|product| std::cmp::Reverse(product.price.to_minor_units()));
            }
        }
    }

    /// The current sort key.
    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// The current page number (1-based).
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// The page size the listing paginates with.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of pages; zero when the listing is empty.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.view.len().div_ceil(self.page_size)
    }

    /// Total number of products in the listing, across all pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Check if the listing is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The products on the current page, in view order.
    #[must_use]
    pub fn page_items(&self) -> &[&'a Product<'a>] {
        let start = (self.page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(self.view.len());

        self.view.get(start..end).unwrap_or(&[])
    }

    /// The 1-based "Showing X - Y of N" range for the current page, or
    /// `None` when the page is empty.
    #[must_use]
    pub fn visible_range(&self) -> Option<(usize, usize, usize)> {
        let items = self.page_items();

        if items.is_empty() {
            return None;
        }

        let start = (self.page - 1).saturating_mul(self.page_size) + 1;
        let end = start + items.len() - 1;

        Some((start, end, self.view.len()))
    }
}
