//! Order Summary
//!
//! Rendering model for the cart page's order summary: one row per cart
//! line plus subtotal, shipping, and total. Shipping is always free in this
//! store.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    pricing::{TotalPriceError, line_total},
};

/// Errors that can occur when building or writing an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating a line or cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// One rendered line of the order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow<'a> {
    /// Product name from the line snapshot.
    pub name: String,

    /// Unit price from the line snapshot.
    pub unit_price: Money<'a, Currency>,

    /// Struck-through pre-discount price, when the line was on offer.
    pub original_price: Option<Money<'a, Currency>>,

    /// Units of the product on the line.
    pub quantity: u32,

    /// Unit price times quantity.
    pub line_total: Money<'a, Currency>,
}

impl<'a> SummaryRow<'a> {
    fn from_line(line: &CartLine<'a>) -> Result<Self, TotalPriceError> {
        let snapshot = line.snapshot();

        Ok(SummaryRow {
            name: snapshot.name.clone(),
            unit_price: snapshot.price,
            original_price: snapshot.original_price,
            quantity: line.quantity(),
            line_total: line_total(line)?,
        })
    }
}

/// Final order summary for a cart.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    rows: Vec<SummaryRow<'a>>,
    total_items: u64,
    subtotal: Money<'a, Currency>,
}

impl<'a> OrderSummary<'a> {
    /// Build an order summary from the current cart state.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if a line or cart total overflows.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, SummaryError> {
        let rows = cart
            .iter()
            .map(SummaryRow::from_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderSummary {
            rows,
            total_items: cart.total_items(),
            subtotal: cart.total_price()?,
        })
    }

    /// The rendered rows, one per cart line.
    #[must_use]
    pub fn rows(&self) -> &[SummaryRow<'a>] {
        &self.rows
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of line totals before shipping.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount payable. Shipping is free, so this equals the subtotal.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Render the summary as a table followed by the totals block.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Unit Price", "Was", "Qty", "Line Total"]);

        for row in &self.rows {
            let original = row
                .original_price
                .map_or_else(String::new, |price| price.to_string());

            builder.push_record([
                row.name.clone(),
                row.unit_price.to_string(),
                original,
                row.quantity.to_string(),
                row.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..5), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out)?;
        writeln!(
            out,
            " Subtotal ({count} {noun}): {subtotal}",
            count = self.total_items,
            noun = if self.total_items == 1 { "item" } else { "items" },
            subtotal = self.subtotal
        )?;
        writeln!(out, " Shipping: FREE")?;
        writeln!(out, " Total: {total}", total = self.total())?;

        Ok(())
    }
}
