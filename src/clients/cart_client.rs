//! # Cart Client
//!
//! Provides a high-level API for interacting with the cart actor.
//! Carts are created lazily: the first `add_item` for a user opens their cart, and reads for a user without
//! a cart behave as if the cart were empty.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::catalog_actor::CatalogError;
use crate::clients::CatalogClient;
use crate::framework::{retry_transient, ActorClient, FrameworkError, ResourceClient, RetryPolicy};
use crate::model::{line_subtotal, Cart, CartCreate, CartLine, CartView, CartViewItem, ProductId, UserId};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    catalog: CatalogClient,
    retry: RetryPolicy,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<CartError>()
            .unwrap_or_else(|other| CartError::ActorCommunicationError(other.to_string()))
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, catalog: CatalogClient, retry: RetryPolicy) -> Self {
        Self {
            inner,
            catalog,
            retry,
        }
    }

    /// Opens the user's cart if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_cart(&self, user_id: UserId) -> Result<(), CartError> {
        match self.inner.create(CartCreate { user_id }).await {
            Ok(_) | Err(FrameworkError::Conflict(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn act(&self, user_id: UserId, action: CartAction) -> Result<CartActionResult, FrameworkError> {
        self.inner.perform_action(user_id, action).await
    }

    /// Adds units of a product, merging with an existing line. Returns the resulting line.
    #[instrument(skip(self))]
    pub async fn add_item(&self, user_id: UserId, product_id: ProductId, quantity: u32) -> Result<CartLine, CartError> {
        debug!("Sending request");
        self.ensure_cart(user_id).await?;
        match self
            .act(user_id, CartAction::AddItem { product_id, quantity })
            .await
            .map_err(Self::map_error)?
        {
            CartActionResult::AddItem(line) => Ok(line),
            _ => unreachable!("AddItem action must return AddItem result"),
        }
    }

    /// Replaces the quantity of an existing line.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, CartError> {
        debug!("Sending request");
        let result = self
            .act(user_id, CartAction::SetQuantity { product_id, quantity })
            .await;
        match result {
            Ok(CartActionResult::SetQuantity(line)) => Ok(line),
            Ok(_) => unreachable!("SetQuantity action must return SetQuantity result"),
            // No cart means no line.
            Err(FrameworkError::NotFound(_)) => Err(CartError::ItemNotFound(product_id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> Result<(), CartError> {
        debug!("Sending request");
        match self.act(user_id, CartAction::RemoveItem(product_id)).await {
            Ok(_) => Ok(()),
            Err(FrameworkError::NotFound(_)) => Err(CartError::ItemNotFound(product_id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Empties the cart. Clearing an empty or never-opened cart succeeds.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: UserId) -> Result<(), CartError> {
        debug!("Sending request");
        match self.act(user_id, CartAction::Clear).await {
            Ok(_) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// The live lines in product id order.
    #[instrument(skip(self))]
    pub async fn list_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        let cart = retry_transient(&self.retry, || self.inner.get(user_id))
            .await
            .map_err(Self::map_error)?;
        Ok(cart.map(|cart| cart.to_lines()).unwrap_or_default())
    }

    /// The cart priced against the current catalog. Lines whose product no longer exists are skipped.
    #[instrument(skip(self))]
    pub async fn view_cart(&self, user_id: UserId) -> Result<CartView, CartError> {
        let lines = self.list_cart(user_id).await?;
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let product = match self.catalog.get_product(line.product_id).await {
                Ok(product) => product,
                Err(CatalogError::NotFound(id)) => {
                    warn!(product_id = %id, "Skipping cart line for missing product");
                    continue;
                }
                Err(e) => return Err(CartError::ActorCommunicationError(e.to_string())),
            };
            let subtotal = line_subtotal(product.unit_price, line.quantity).ok_or(CartError::AmountOverflow)?;
            items.push(CartViewItem {
                product_id: product.id,
                product_name: product.name,
                unit_price: product.unit_price,
                quantity: line.quantity,
                subtotal,
            });
        }

        CartView::new(user_id, items).ok_or(CartError::AmountOverflow)
    }

    /// Claims the cart for checkout and returns the claimed lines.
    ///
    /// An empty vector means there was nothing to claim: the cart is empty, was never opened, or is already
    /// claimed by another checkout.
    #[instrument(skip(self))]
    pub async fn begin_checkout(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        match self.act(user_id, CartAction::BeginCheckout).await {
            Ok(CartActionResult::BeginCheckout(lines)) => Ok(lines),
            Ok(_) => unreachable!("BeginCheckout action must return BeginCheckout result"),
            Err(FrameworkError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Discards the claimed lines; the checkout went through.
    #[instrument(skip(self))]
    pub async fn commit_checkout(&self, user_id: UserId) -> Result<(), CartError> {
        self.act(user_id, CartAction::CommitCheckout)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    /// Puts the claimed lines back; the checkout was abandoned.
    #[instrument(skip(self))]
    pub async fn release_checkout(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        match self.act(user_id, CartAction::ReleaseCheckout).await {
            Ok(CartActionResult::ReleaseCheckout(lines)) => Ok(lines),
            Ok(_) => unreachable!("ReleaseCheckout action must return ReleaseCheckout result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::Product;

    fn offline_catalog() -> CatalogClient {
        let (client, _receiver) = create_mock_client::<Product>(1);
        CatalogClient::new(client, RetryPolicy::none())
    }

    #[tokio::test]
    async fn test_missing_cart_reads_as_empty() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(UserId(3)).return_ok(None);
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound("user_3".into()));
        mock.expect_action(UserId(3))
            .return_err(FrameworkError::NotFound("user_3".into()));
        let carts = CartClient::new(mock.client(), offline_catalog(), RetryPolicy::none());

        assert!(carts.list_cart(UserId(3)).await.unwrap().is_empty());
        carts.clear_cart(UserId(3)).await.unwrap();
        assert!(carts.begin_checkout(UserId(3)).await.unwrap().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_item_opens_the_cart_first() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("user_1".into()));
        mock.expect_action(UserId(1))
            .return_ok(CartActionResult::AddItem(CartLine {
                user_id: UserId(1),
                product_id: ProductId(2),
                quantity: 3,
            }));
        let carts = CartClient::new(mock.client(), offline_catalog(), RetryPolicy::none());

        let line = carts.add_item(UserId(1), ProductId(2), 3).await.unwrap();
        assert_eq!(line.quantity, 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_cart_errors_keep_their_type() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let carts = CartClient::new(client, offline_catalog(), RetryPolicy::none());

        let task = tokio::spawn(async move { carts.remove_item(UserId(1), ProductId(5)).await });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, UserId(1));
        assert_eq!(action, CartAction::RemoveItem(ProductId(5)));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                CartError::CheckoutInProgress(UserId(1)),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CartError::CheckoutInProgress(UserId(1)))
        );
    }

    #[tokio::test]
    async fn test_view_refuses_oversized_amounts() {
        let mut cart = Cart::new(UserId(1));
        cart.lines.insert(ProductId(1), 2);
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(UserId(1)).return_ok(Some(cart));
        let mut catalog = MockClient::<Product>::new();
        catalog
            .expect_get(ProductId(1))
            .return_ok(Some(Product::new(ProductId(1), "Gold", rust_decimal::Decimal::MAX, 10)));
        let carts = CartClient::new(
            mock.client(),
            CatalogClient::new(catalog.client(), RetryPolicy::none()),
            RetryPolicy::none(),
        );

        assert_eq!(carts.view_cart(UserId(1)).await, Err(CartError::AmountOverflow));
        mock.verify();
        catalog.verify();
    }
}
