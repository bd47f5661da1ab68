//! Product catalog: prices, names and the authoritative stock counts.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CatalogClient;
use crate::config::StoreConfig;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new catalog actor and its client.
pub fn new(config: &StoreConfig) -> (ResourceActor<Product>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(config.channel_buffer);
    let client = CatalogClient::new(
        generic_client.with_read_timeout(config.read_timeout()),
        config.retry_policy(),
    );

    (actor, client)
}
