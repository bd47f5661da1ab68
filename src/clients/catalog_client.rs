//! # Catalog Client
//!
//! Provides a high-level API for interacting with the catalog actor.
//! It wraps a `ResourceClient<Product>` and exposes the product and stock operations with typed results.
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError, StockDecrement};
use crate::framework::{retry_transient, ActorClient, Filter, FrameworkError, ResourceClient, RetryPolicy};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>, retry: RetryPolicy) -> Self {
        Self { inner, retry }
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<CatalogError>()
            .unwrap_or_else(|other| CatalogError::ActorCommunicationError(other.to_string()))
    }
}

/// Like [`ActorClient::map_error`], but a missing product is reported with its id.
fn product_error(id: ProductId, e: FrameworkError) -> CatalogError {
    match e {
        FrameworkError::NotFound(_) => CatalogError::NotFound(id),
        other => CatalogClient::map_error(other),
    }
}

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Applies an admin edit and returns the product as stored afterwards.
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| product_error(id, e))
    }

    /// Fetches a product, retrying reads that timed out.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        debug!("Sending request");
        retry_transient(&self.retry, || self.inner.get(id))
            .await
            .map_err(Self::map_error)?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Every product, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = retry_transient(&self.retry, || self.inner.list(Filter::all()))
            .await
            .map_err(Self::map_error)?;
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, CatalogError> {
        debug!("Checking stock for product {}", id);
        match self.inner.perform_action(id, CatalogAction::CheckStock).await {
            Ok(CatalogActionResult::CheckStock(level)) => Ok(level),
            Ok(_) => unreachable!("CheckStock action must return CheckStock result"),
            Err(e) => Err(product_error(id, e)),
        }
    }

    /// Atomically removes `quantity` units if at least that many are on hand.
    ///
    /// A shortfall comes back as `Ok(StockDecrement::InsufficientStock { .. })` with the stock untouched;
    /// only a zero quantity, a missing product or a dead actor produce `Err`.
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: ProductId, quantity: u32) -> Result<StockDecrement, CatalogError> {
        debug!("Decrementing {} units of product {}", quantity, id);
        match self
            .inner
            .perform_action(id, CatalogAction::DecrementStock(quantity))
            .await
        {
            Ok(CatalogActionResult::DecrementStock(outcome)) => Ok(outcome),
            Ok(_) => unreachable!("DecrementStock action must return DecrementStock result"),
            Err(e) => Err(product_error(id, e)),
        }
    }

    /// Puts `quantity` units back and returns the new stock level.
    #[instrument(skip(self))]
    pub async fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<u32, CatalogError> {
        debug!("Restoring {} units of product {}", quantity, id);
        match self
            .inner
            .perform_action(id, CatalogAction::RestoreStock(quantity))
            .await
        {
            Ok(CatalogActionResult::RestoreStock(level)) => Ok(level),
            Ok(_) => unreachable!("RestoreStock action must return RestoreStock result"),
            Err(e) => Err(product_error(id, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn quick_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[tokio::test]
    async fn test_decrement_stock_reports_shortfall_as_value() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let catalog = CatalogClient::new(client, RetryPolicy::none());

        let task = tokio::spawn(async move { catalog.decrement_stock(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, CatalogAction::DecrementStock(5));

        responder
            .send(Ok(CatalogActionResult::DecrementStock(
                StockDecrement::InsufficientStock { available: 3 },
            )))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Ok(StockDecrement::InsufficientStock { available: 3 }));
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_type() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let catalog = CatalogClient::new(client, RetryPolicy::none());

        let task = tokio::spawn(async move { catalog.restore_stock(ProductId(2), 0).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                CatalogError::InvalidQuantity(0),
            ))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(CatalogError::InvalidQuantity(0)));
    }

    #[tokio::test]
    async fn test_missing_product_is_named() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(9))
            .return_err(FrameworkError::NotFound("product_9".into()));
        let catalog = CatalogClient::new(mock.client(), RetryPolicy::none());

        assert_eq!(
            catalog.check_stock(ProductId(9)).await,
            Err(CatalogError::NotFound(ProductId(9)))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_product_retries_timeouts() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(1)).return_err(FrameworkError::Timeout(5));
        mock.expect_get(ProductId(1))
            .return_ok(Some(Product::new(ProductId(1), "Lamp", dec!(19.99), 4)));
        let catalog = CatalogClient::new(mock.client(), quick_retry());

        let product = catalog.get_product(ProductId(1)).await.unwrap();
        assert_eq!(product.name, "Lamp");
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_product_absent_is_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(4)).return_ok(None);
        let catalog = CatalogClient::new(mock.client(), quick_retry());

        assert_eq!(
            catalog.get_product(ProductId(4)).await,
            Err(CatalogError::NotFound(ProductId(4)))
        );
        mock.verify();
    }
}
