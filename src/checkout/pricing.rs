//! Line snapshots and order totals.
//!
//! Amounts are `Decimal`, so `unit_price * quantity` and the sum over lines are exact. Amounts too large for a
//! `Decimal` are refused rather than wrapped or rounded.

use super::error::CheckoutError;
use crate::model::{checked_total, CartLine, OrderLineSnapshot, Product};
use rust_decimal::Decimal;

/// The priced content of an order-to-be.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<OrderLineSnapshot>,
    pub total_amount: Decimal,
}

/// Snapshots each cart line against the product read for it.
pub fn quote<'a>(items: impl IntoIterator<Item = (&'a CartLine, &'a Product)>) -> Result<Quote, CheckoutError> {
    let lines = items
        .into_iter()
        .map(|(line, product)| {
            OrderLineSnapshot::new(product.id, product.name.clone(), product.unit_price, line.quantity)
                .ok_or(CheckoutError::AmountOverflow)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let total_amount = checked_total(lines.iter().map(|line| line.subtotal)).ok_or(CheckoutError::AmountOverflow)?;

    Ok(Quote {
        lines,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserId};
    use rust_decimal_macros::dec;

    fn line(product: u32, quantity: u32) -> CartLine {
        CartLine {
            user_id: UserId(1),
            product_id: ProductId(product),
            quantity,
        }
    }

    #[test]
    fn two_lines_total_twenty_five() {
        let p1 = Product::new(ProductId(1), "P1", dec!(10.00), 10);
        let p2 = Product::new(ProductId(2), "P2", dec!(5.00), 10);
        let (l1, l2) = (line(1, 2), line(2, 1));

        let quote = quote([(&l1, &p1), (&l2, &p2)]).unwrap();

        assert_eq!(quote.total_amount, dec!(25.00));
        assert_eq!(quote.lines[0].subtotal, dec!(20.00));
        assert_eq!(quote.lines[0].product_name, "P1");
        assert_eq!(quote.lines[1].subtotal, dec!(5.00));
    }

    #[test]
    fn cents_do_not_drift() {
        let dime = Product::new(ProductId(1), "Dime", dec!(0.10), 1000);
        let cent = Product::new(ProductId(2), "Cent", dec!(0.01), 1000);
        let (l1, l2) = (line(1, 3), line(2, 7));

        let quote = quote([(&l1, &dime), (&l2, &cent)]).unwrap();

        assert_eq!(quote.lines[0].subtotal, dec!(0.30));
        assert_eq!(quote.total_amount, dec!(0.37));
    }

    #[test]
    fn oversized_amounts_are_refused() {
        let gold = Product::new(ProductId(1), "Gold", Decimal::MAX, 10);
        let one = line(1, 1);
        let two = line(1, 2);

        assert_eq!(quote([(&two, &gold)]), Err(CheckoutError::AmountOverflow));
        assert_eq!(
            quote([(&one, &gold), (&one, &gold)]),
            Err(CheckoutError::AmountOverflow)
        );
        assert_eq!(quote([(&one, &gold)]).unwrap().total_amount, Decimal::MAX);
    }
}
