use crate::checkout::CheckoutEngine;
use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::config::Config;
use tracing::{error, info};

/// The runtime orchestrator for the storefront.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the catalog, cart and order actors
/// - **Dependency Wiring**: The cart actor validates lines against the catalog, so it is started with a
///   `CatalogClient` as its context
/// - **Engine Construction**: One [`CheckoutEngine`] built from the store clients
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new();
///
/// let product_id = system.catalog.create_product(params).await?;
/// system.carts.add_item(user_id, product_id, 2).await?;
/// let order = system.checkout.checkout(user_id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    pub catalog: CatalogClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub checkout: CheckoutEngine,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for StorefrontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontSystem {
    /// Starts the system with configuration read from the environment.
    pub fn new() -> Self {
        Self::with_config(Config::from_env())
    }

    /// Starts every actor and wires the engine. Must be called inside a Tokio runtime.
    pub fn with_config(config: Config) -> Self {
        info!(?config, "Starting storefront");

        // 1. Create actors (dependencies are injected when they start)
        let (catalog_actor, catalog) = crate::catalog_actor::new(&config.store);
        let (cart_actor, carts) = crate::cart_actor::new(&config.store, catalog.clone());
        let (order_actor, orders) = crate::order_actor::new(&config.store);

        // 2. Start actors with injected context
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(catalog.clone()));
        let order_handle = tokio::spawn(order_actor.run(()));

        let checkout = CheckoutEngine::new(
            catalog.clone(),
            carts.clone(),
            orders.clone(),
            config.checkout,
        );

        Self {
            catalog,
            carts,
            orders,
            checkout,
            handles: vec![catalog_handle, cart_handle, order_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the actors' channels; each actor drains its mailbox and exits. The cart
    /// actor holds a catalog client in its context, so the catalog actor stops once the cart actor has.
    ///
    /// Clones of the clients or of the engine that are still alive elsewhere keep their actor running, and
    /// this call waits for them to be dropped.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.checkout);
        drop(self.carts);
        drop(self.orders);
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
