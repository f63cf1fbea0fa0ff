//! Demo run of the order service: a small menu, a couple of orders, one that the
//! ledger cannot cover, and the reports at the end.
//!
//! ```bash
//! RUST_LOG=info cargo run -p cafe-orders
//! CAFE_MAILBOX_CAPACITY=64 RUST_LOG=debug cargo run -p cafe-orders
//! ```

use actor_framework::tracing::setup_tracing;
use cafe_orders::coordinator::PlaceOrder;
use cafe_orders::lifecycle::{OrderSystem, SystemConfig};
use cafe_orders::model::{CustomerCreate, IngredientCreate, MenuItemCreate, OrderStatus};
use cafe_orders::reports::{SearchQuery, DEFAULT_POPULAR_LIMIT};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SystemConfig::from_env().map_err(|e| e.to_string())?;
    let system = OrderSystem::with_config(config);

    let span = tracing::info_span!("catalog_setup");
    let (alice, latte, croissant) = async {
        let alice = system
            .customer_client
            .create_customer(CustomerCreate {
                email: "alice@example.com".into(),
                preferences: "oat milk".into(),
                ..CustomerCreate::new("Alice Moreau")
            })
            .await
            .map_err(|e| e.to_string())?;

        let inventory = &system.inventory_client;
        let milk = inventory
            .create_ingredient(
                IngredientCreate::new("Milk", "l", Decimal::from(4)).with_reorder_level(Decimal::ONE),
            )
            .await
            .map_err(|e| e.to_string())?;
        let espresso = inventory
            .create_ingredient(IngredientCreate::new("Espresso", "shots", Decimal::from(20)))
            .await
            .map_err(|e| e.to_string())?;
        let flour = inventory
            .create_ingredient(IngredientCreate::new("Flour", "kg", Decimal::from(10)))
            .await
            .map_err(|e| e.to_string())?;

        let latte = system
            .menu_client
            .create_menu_item(
                MenuItemCreate::new("Latte", Decimal::new(450, 2))
                    .with_description("Double shot, steamed milk")
                    .with_ingredient(milk.id, Decimal::ONE)
                    .with_ingredient(espresso.id, Decimal::TWO),
            )
            .await
            .map_err(|e| e.to_string())?;
        let croissant = system
            .menu_client
            .create_menu_item(
                MenuItemCreate::new("Croissant", Decimal::new(300, 2))
                    .with_ingredient(flour.id, Decimal::new(1, 1)),
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>((alice, latte, croissant))
    }
    .instrument(span)
    .await?;

    info!(customer = %alice.id, "Catalog ready");

    let span = tracing::info_span!("order_processing");
    async {
        let breakfast = PlaceOrder::new(alice.id)
            .line(latte.id, 2)
            .line(croissant.id, 1)
            .with_instructions("to go")
            .paid_with("card");
        match system.coordinator.place_order(breakfast).await {
            Ok(order) => {
                info!(order = %order.id, total = %order.total_price, "Order placed");
                if let Err(e) = system
                    .coordinator
                    .update_order_status(order.id, OrderStatus::Completed)
                    .await
                {
                    error!(error = %e, "Could not complete order");
                }
            }
            Err(e) => error!(error = %e, "Order failed"),
        }

        // Only two litres of milk are left: this one is refused and changes nothing.
        let too_big = PlaceOrder::new(alice.id).line(latte.id, 5).paid_with("cash");
        if let Err(e) = system.coordinator.place_order(too_big).await {
            info!(error = %e, "Order refused as expected");
        }
    }
    .instrument(span)
    .await;

    let reports = &system.reports;
    let revenue = reports.total_revenue().await.map_err(|e| e.to_string())?;
    let popular = reports
        .popular_items(DEFAULT_POPULAR_LIMIT)
        .await
        .map_err(|e| e.to_string())?;
    let today = Utc::now();
    let this_month = reports
        .orders_by_month(today.year())
        .await
        .map_err(|e| e.to_string())?;
    let hits = reports
        .search(&SearchQuery::new("latte"))
        .await
        .map_err(|e| e.to_string())?;
    let low_stock = system
        .inventory_client
        .low_stock()
        .await
        .map_err(|e| e.to_string())?;

    info!(%revenue, "Total revenue");
    for item in &popular {
        info!(item = %item.item_name, times = item.ordered_times, "Popular");
    }
    info!(
        month = today.month(),
        orders = this_month[today.month0() as usize].orders,
        "Orders this month"
    );
    info!(
        menu = hits.menu_items.len(),
        orders = hits.orders.len(),
        "Search for \"latte\""
    );
    for row in &low_stock {
        info!(ingredient = %row.name, quantity = %row.quantity, "Low stock");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
