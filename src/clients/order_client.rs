//! # Order Client
//!
//! Provides a high-level API for interacting with the order actor.
//! Reads are scoped to the requesting user: someone else's order is reported as not found.
use crate::framework::{retry_transient, ActorClient, Filter, FrameworkError, ResourceClient, RetryPolicy};
use crate::model::{Order, OrderCreate, OrderId, OrderSummary, UserId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use std::cmp::Reverse;
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    retry: RetryPolicy,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.downcast_entity::<OrderError>()
            .unwrap_or_else(|other| OrderError::ActorCommunicationError(other.to_string()))
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, retry: RetryPolicy) -> Self {
        Self { inner, retry }
    }

    /// Stores a new `pending` order, header and lines in one request.
    #[instrument(skip(self, params), fields(order_number = %params.order_number))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("create_order called");
        let order_number = params.order_number.clone();
        match self.inner.create(params).await {
            Ok(id) => {
                info!(order_id = %id, "Order stored");
                Ok(id)
            }
            Err(FrameworkError::Conflict(_)) => Err(OrderError::DuplicateOrderNumber(order_number)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Looks an order up by id regardless of its owner.
    #[instrument(skip(self))]
    pub async fn find_order(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        retry_transient(&self.retry, || self.inner.get(id))
            .await
            .map_err(Self::map_error)
    }

    /// The order, if it exists and belongs to `user_id`.
    #[instrument(skip(self))]
    pub async fn get_order(&self, user_id: UserId, id: OrderId) -> Result<Order, OrderError> {
        self.find_order(id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or(OrderError::NotFound(id))
    }

    /// The user's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, user_id: UserId) -> Result<Vec<OrderSummary>, OrderError> {
        let mut orders = retry_transient(&self.retry, || {
            self.inner
                .list(Filter::new(move |order: &Order| order.user_id == user_id))
        })
        .await
        .map_err(Self::map_error)?;

        orders.sort_by_key(|order| Reverse((order.created_at, order.id)));
        Ok(orders.iter().map(OrderSummary::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.inner.perform_action(id, OrderAction::MarkPaid).await {
            Ok(OrderActionResult::MarkPaid(order)) => Ok(order),
            Err(FrameworkError::NotFound(_)) => Err(OrderError::NotFound(id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes an order. Only used to undo an order whose checkout failed.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        match self.inner.delete(id).await {
            Ok(()) => Ok(()),
            Err(FrameworkError::NotFound(_)) => Err(OrderError::NotFound(id)),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
