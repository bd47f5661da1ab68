//! Per-user carts and the checkout claim protocol.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, CatalogClient};
use crate::config::StoreConfig;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new cart actor and its client.
///
/// The returned client prices carts through `catalog`; the actor itself receives its catalog dependency
/// later, through `run(context)`.
pub fn new(config: &StoreConfig, catalog: CatalogClient) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_buffer);
    let client = CartClient::new(
        generic_client.with_read_timeout(config.read_timeout()),
        catalog,
        config.retry_policy(),
    );

    (actor, client)
}
