//! `ActorEntity` implementation for [`Product`], the catalog's resource type.
//!
//! Holds the price validation shared by create and update, and the stock actions. The conditional decrement
//! is evaluated entirely inside the actor, so "decrement by Q where stock >= Q" never races with another
//! request.

use super::actions::{CatalogAction, CatalogActionResult, StockDecrement};
use super::error::CatalogError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_price(price: Decimal) -> Result<Decimal, CatalogError> {
    if price > Decimal::ZERO {
        Ok(price)
    } else {
        Err(CatalogError::InvalidPrice(price))
    }
}

impl Product {
    fn decrement(&mut self, quantity: u32) -> Result<StockDecrement, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }
        if self.stock < quantity {
            return Ok(StockDecrement::InsufficientStock {
                available: self.stock,
            });
        }
        self.stock -= quantity;
        Ok(StockDecrement::Applied {
            remaining: self.stock,
        })
    }

    fn restore(&mut self, quantity: u32) -> Result<u32, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }
        self.stock = self
            .stock
            .checked_add(quantity)
            .ok_or(CatalogError::StockOverflow {
                stock: self.stock,
                quantity,
            })?;
        Ok(self.stock)
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, CatalogError> {
        let unit_price = validate_price(params.unit_price)?;
        Ok(Self::new(id, params.name, unit_price, params.stock))
    }

    /// Applies an admin edit. Nothing changes unless every supplied field is valid.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), CatalogError> {
        let unit_price = update.unit_price.map(validate_price).transpose()?;

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(unit_price) = unit_price {
            self.unit_price = unit_price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CatalogAction,
        _ctx: &(),
    ) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::CheckStock => Ok(CatalogActionResult::CheckStock(self.stock)),
            CatalogAction::DecrementStock(quantity) => {
                self.decrement(quantity).map(CatalogActionResult::DecrementStock)
            }
            CatalogAction::RestoreStock(quantity) => {
                self.restore(quantity).map(CatalogActionResult::RestoreStock)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget(stock: u32) -> Product {
        Product::new(ProductId(1), "Widget", dec!(10.00), stock)
    }

    #[test]
    fn create_rejects_non_positive_prices() {
        for price in [dec!(0), dec!(-1.50)] {
            let result = Product::from_create_params(
                ProductId(1),
                ProductCreate {
                    name: "Free lunch".into(),
                    unit_price: price,
                    stock: 1,
                },
            );
            assert_eq!(result.unwrap_err(), CatalogError::InvalidPrice(price));
        }
    }

    #[tokio::test]
    async fn decrement_applies_only_when_enough_stock() {
        let mut product = widget(3);

        let short = product
            .handle_action(CatalogAction::DecrementStock(5), &())
            .await
            .unwrap();
        assert_eq!(
            short,
            CatalogActionResult::DecrementStock(StockDecrement::InsufficientStock { available: 3 })
        );
        assert_eq!(product.stock, 3);

        let exact = product
            .handle_action(CatalogAction::DecrementStock(3), &())
            .await
            .unwrap();
        assert_eq!(
            exact,
            CatalogActionResult::DecrementStock(StockDecrement::Applied { remaining: 0 })
        );
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn zero_quantities_are_rejected() {
        let mut product = widget(3);
        assert_eq!(
            product.handle_action(CatalogAction::DecrementStock(0), &()).await,
            Err(CatalogError::InvalidQuantity(0))
        );
        assert_eq!(
            product.handle_action(CatalogAction::RestoreStock(0), &()).await,
            Err(CatalogError::InvalidQuantity(0))
        );
    }

    #[tokio::test]
    async fn restore_detects_overflow() {
        let mut product = widget(u32::MAX - 1);
        let err = product
            .handle_action(CatalogAction::RestoreStock(2), &())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::StockOverflow { .. }));
        assert_eq!(product.stock, u32::MAX - 1);
    }

    #[tokio::test]
    async fn invalid_update_changes_nothing() {
        let mut product = widget(3);
        let update = ProductUpdate {
            name: Some("Renamed".into()),
            unit_price: Some(dec!(0)),
            stock: Some(9),
        };
        assert!(product.on_update(update, &()).await.is_err());
        assert_eq!(product, widget(3));
    }
}
