//! Order store: placed orders with their immutable line snapshots.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::config::StoreConfig;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(config: &StoreConfig) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_buffer);
    let client = OrderClient::new(
        generic_client.with_read_timeout(config.read_timeout()),
        config.retry_policy(),
    );

    (actor, client)
}
