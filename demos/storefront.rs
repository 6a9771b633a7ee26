//! Storefront Demo
//!
//! Loads a catalog fixture, browses a listing the way a category page
//! would, runs a short cart session, and prints the order summary.
//!
//! Use `-f` to load a catalog fixture set by name
//! Use `-g` to filter the listing by gender
//! Use `-s` to sort the listing by price (`lowToHigh` or `highToLow`)
//! Use `-p` to select a listing page

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use boutique::{
    cart::CartStore,
    fixtures::Fixture,
    listing::{Listing, SortKey},
    receipt::OrderSummary,
    utils::DemoStorefrontArgs,
};

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoStorefrontArgs::parse();

    let fixture = Fixture::new();
    let catalog = fixture.load_catalog(&args.fixture)?;

    let products = match args.gender.as_deref() {
        Some(gender) => catalog.by_gender(gender),
        None => catalog.iter().collect(),
    };

    let mut listing = Listing::new(products);

    match args.sort.as_deref() {
        Some("lowToHigh") => listing.set_sort(SortKey::PriceLowToHigh),
        Some("highToLow") => listing.set_sort(SortKey::PriceHighToLow),
        _ => {}
    }

    listing.set_page(args.page);

    println!("Catalog: {} products", catalog.len());

    if let Some((start, end, total)) = listing.visible_range() {
        println!("Showing {start} - {end} of {total} items\n");
    } else {
        println!("No items on page {}\n", listing.page());
    }

    for product in listing.page_items() {
        let stock = if product.in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        };

        match product.discount_percent() {
            Some(percent) => {
                println!("{} - {} ({percent}% OFF) [{stock}]", product.name, product.price);
            }
            None => println!("{} - {} [{stock}]", product.name, product.price),
        }
    }

    let mut store = CartStore::new(catalog.currency());

    let in_stock: Vec<_> = listing
        .page_items()
        .iter()
        .copied()
        .filter(|product| product.in_stock)
        .take(2)
        .collect();

    if let Some(first) = in_stock.first() {
        store.add(first, 2)?;
    }

    if let Some(second) = in_stock.get(1) {
        store.add(second, 1)?;
    }

    println!("\nCart: {} items", store.total_items());

    let summary = OrderSummary::from_cart(store.cart())?;
    let stdout = io::stdout();
    let handle = stdout.lock();

    summary.write_to(handle)?;

    Ok(())
}
