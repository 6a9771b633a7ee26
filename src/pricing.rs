//! Prices

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// A line total or the cart total overflowed minor units.
    #[error("cart total overflowed minor units")]
    Overflow,
}

/// Sum of quantities across a set of cart lines.
#[must_use]
pub fn total_items(lines: &[CartLine<'_>]) -> u64 {
    lines
        .iter()
        .map(|line| u64::from(line.quantity()))
        .sum()
}

/// The total for one line: snapshot price times quantity.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the product exceeded minor-unit range.
pub fn line_total<'a>(line: &CartLine<'a>) -> Result<Money<'a, Currency>, TotalPriceError> {
    let price = line.snapshot().price;

    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Calculates the total price of a set of cart lines.
///
/// An empty set totals zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total or the sum exceeded
///   minor-unit range.
pub fn total_price<'a>(
    lines: &[CartLine<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let mut total_minor: i64 = 0;

    for line in lines {
        total_minor = total_minor
            .checked_add(line_total(line)?.to_minor_units())
            .ok_or(TotalPriceError::Overflow)?;
    }

    Ok(Money::from_minor(total_minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use smallvec::SmallVec;
    use testresult::TestResult;

    use crate::{
        cart::Cart,
        products::{Product, ProductId},
    };

    use super::*;

    fn lines_for(prices_and_quantities: &[(i64, u32)]) -> TestResult<Cart<'static>> {
        let mut cart = Cart::new(INR);

        for (index, (price_minor, quantity)) in prices_and_quantities.iter().enumerate() {
            let id = i64::try_from(index)? + 1;

            let product = Product {
                id: ProductId::from(id),
                name: format!("Product {id}"),
                price: Money::from_minor(*price_minor, INR),
                original_price: None,
                image: format!("/images/{id}.jpg"),
                in_stock: true,
                category: "t-shirts".to_string(),
                gender: "men".to_string(),
                description: None,
                sizes: SmallVec::new(),
                reviews: None,
            };

            cart.add(&product, *quantity)?;
        }

        Ok(cart)
    }

    #[test]
    fn total_items_sums_quantities() -> TestResult {
        let cart = lines_for(&[(10_000, 2), (20_000, 3)])?;

        assert_eq!(total_items(cart.lines()), 5);

        Ok(())
    }

    #[test]
    fn total_price_weights_lines_by_quantity() -> TestResult {
        let cart = lines_for(&[(10_000, 2), (20_000, 3)])?;

        assert_eq!(
            total_price(cart.lines(), INR)?,
            Money::from_minor(80_000, INR)
        );

        Ok(())
    }

    #[test]
    fn total_price_of_no_lines_is_zero() {
        assert_eq!(total_price(&[], INR), Ok(Money::from_minor(0, INR)));
    }

    #[test]
    fn line_total_overflow_is_reported() -> TestResult {
        let cart = lines_for(&[(i64::MAX, 2)])?;
        let line = cart
            .lines()
            .first()
            .ok_or_else(|| "expected one line".to_string())?;

        assert_eq!(line_total(line), Err(TotalPriceError::Overflow));

        Ok(())
    }
}
