use super::SystemConfig;
use crate::clients::{CustomerClient, InventoryClient, MenuClient, OrderClient};
use crate::coordinator::OrderCoordinator;
use crate::reports::Reports;
use crate::{customer_actor, inventory_actor, menu_actor, order_actor};
use tracing::{error, info};

/// Starts, wires and stops every actor of the order service.
///
/// The four resource actors have no dependencies on each other (`Context = ()`);
/// the [`OrderCoordinator`] and [`Reports`] are built on clones of their clients.
///
/// ```rust
/// use cafe_orders::lifecycle::OrderSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = OrderSystem::new();
///     assert!(system.coordinator.list_orders().await.unwrap().is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub menu_client: MenuClient,
    pub inventory_client: InventoryClient,
    pub order_client: OrderClient,

    pub coordinator: OrderCoordinator,
    pub reports: Reports,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSystem {
    /// Starts the system with [`SystemConfig::default`]. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let capacity = config.mailbox_capacity;
        info!(capacity, "Starting order system");

        // 1. Create actors
        let (customer_actor, customer_client) = customer_actor::new(capacity);
        let (menu_actor, menu_client) = menu_actor::new(capacity);
        let (inventory_actor, inventory_client) = inventory_actor::new(capacity);
        let (order_actor, order_client) = order_actor::new(capacity);

        // 2. Start them; none needs another actor's client
        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(inventory_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Services on top
        let coordinator = OrderCoordinator::new(
            customer_client.clone(),
            menu_client.clone(),
            inventory_client.clone(),
            order_client.clone(),
        );
        let reports = Reports::new(
            customer_client.clone(),
            menu_client.clone(),
            order_client.clone(),
        );

        Self {
            customer_client,
            menu_client,
            inventory_client,
            order_client,
            coordinator,
            reports,
            handles,
        }
    }

    /// Drops every client (which closes the mailboxes) and waits for the actors to
    /// drain and stop.
    ///
    /// Clones handed out earlier keep their actor alive; drop them first. A
    /// placement still running on its own task finishes before its actors stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        let Self {
            customer_client,
            menu_client,
            inventory_client,
            order_client,
            coordinator,
            reports,
            handles,
        } = self;
        drop(coordinator);
        drop(reports);
        drop(customer_client);
        drop(menu_client);
        drop(inventory_client);
        drop(order_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
