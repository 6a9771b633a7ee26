//! Utils

use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct DemoStorefrontArgs {
    /// Fixture set to load the catalog from
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Gender classification to filter the listing by
    #[clap(short, long)]
    pub gender: Option<String>,

    /// Listing sort: "lowToHigh", "highToLow", or default catalog order
    #[clap(short, long)]
    pub sort: Option<String>,

    /// Listing page to show
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,
}
