//! `ActorEntity` implementation for [`Cart`].
//!
//! The cart actor's context is the [`CatalogClient`]: adding or re-sizing a line checks the product against
//! the live catalog. These checks are advisory. The stock is only taken at checkout, by the catalog's
//! conditional decrement.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use crate::framework::ActorEntity;
use crate::model::{cart::to_cart_lines, Cart, CartCreate, CartLine, Product, ProductId, UserId};
use async_trait::async_trait;

fn require_positive(quantity: u32) -> Result<u32, CartError> {
    if quantity == 0 {
        Err(CartError::InvalidQuantity(quantity))
    } else {
        Ok(quantity)
    }
}

async fn lookup_product(catalog: &CatalogClient, product_id: ProductId) -> Result<Product, CartError> {
    catalog.get_product(product_id).await.map_err(|e| match e {
        CatalogError::NotFound(id) => CartError::ProductNotFound(id),
        other => CartError::ActorCommunicationError(other.to_string()),
    })
}

fn ensure_available(product: &Product, requested: u32) -> Result<(), CartError> {
    if requested > product.stock {
        return Err(CartError::InsufficientStock {
            product_id: product.id,
            requested,
            available: product.stock,
        });
    }
    Ok(())
}

impl Cart {
    fn line(&self, product_id: ProductId, quantity: u32) -> CartLine {
        CartLine {
            user_id: self.user_id,
            product_id,
            quantity,
        }
    }

    fn ensure_editable(&self) -> Result<(), CartError> {
        if self.is_checking_out() {
            return Err(CartError::CheckoutInProgress(self.user_id));
        }
        Ok(())
    }

    async fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        catalog: &CatalogClient,
    ) -> Result<CartLine, CartError> {
        self.ensure_editable()?;
        let quantity = require_positive(quantity)?;
        let product = lookup_product(catalog, product_id).await?;

        let current = self.lines.get(&product_id).copied().unwrap_or(0);
        let merged = current.saturating_add(quantity);
        ensure_available(&product, merged)?;

        self.lines.insert(product_id, merged);
        Ok(self.line(product_id, merged))
    }

    async fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        catalog: &CatalogClient,
    ) -> Result<CartLine, CartError> {
        self.ensure_editable()?;
        if !self.lines.contains_key(&product_id) {
            return Err(CartError::ItemNotFound(product_id));
        }
        let quantity = require_positive(quantity)?;
        let product = lookup_product(catalog, product_id).await?;
        ensure_available(&product, quantity)?;

        self.lines.insert(product_id, quantity);
        Ok(self.line(product_id, quantity))
    }

    fn remove_item(&mut self, product_id: ProductId) -> Result<CartLine, CartError> {
        self.ensure_editable()?;
        let quantity = self
            .lines
            .remove(&product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;
        Ok(self.line(product_id, quantity))
    }

    fn clear(&mut self) -> Result<(), CartError> {
        self.ensure_editable()?;
        self.lines.clear();
        Ok(())
    }

    fn begin_checkout(&mut self) -> Vec<CartLine> {
        if self.is_checking_out() || self.lines.is_empty() {
            return Vec::new();
        }
        let claimed = std::mem::take(&mut self.lines);
        let lines = to_cart_lines(self.user_id, &claimed);
        self.pending = Some(claimed);
        lines
    }

    fn commit_checkout(&mut self) -> Result<(), CartError> {
        self.pending
            .take()
            .map(|_| ())
            .ok_or(CartError::NoCheckoutPending(self.user_id))
    }

    fn release_checkout(&mut self) -> Result<Vec<CartLine>, CartError> {
        let held = self
            .pending
            .take()
            .ok_or(CartError::NoCheckoutPending(self.user_id))?;
        // Mutations are refused while the hold exists, so the live lines are still empty here.
        self.lines = held;
        Ok(self.to_lines())
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CatalogClient;
    type Error = CartError;

    /// One cart per user: the cart is stored under its owner's id.
    fn assigned_id(params: &CartCreate) -> Option<UserId> {
        Some(params.user_id)
    }

    fn from_create_params(_id: UserId, params: CartCreate) -> Result<Self, CartError> {
        Ok(Self::new(params.user_id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CatalogClient) -> Result<(), CartError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        catalog: &CatalogClient,
    ) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => self
                .add_item(product_id, quantity, catalog)
                .await
                .map(CartActionResult::AddItem),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self
                .set_quantity(product_id, quantity, catalog)
                .await
                .map(CartActionResult::SetQuantity),
            CartAction::RemoveItem(product_id) => {
                self.remove_item(product_id).map(CartActionResult::RemoveItem)
            }
            CartAction::Clear => self.clear().map(CartActionResult::Clear),
            CartAction::BeginCheckout => Ok(CartActionResult::BeginCheckout(self.begin_checkout())),
            CartAction::CommitCheckout => self.commit_checkout().map(CartActionResult::CommitCheckout),
            CartAction::ReleaseCheckout => self
                .release_checkout()
                .map(CartActionResult::ReleaseCheckout),
        }
    }
}
