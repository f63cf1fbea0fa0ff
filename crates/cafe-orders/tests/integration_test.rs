use actor_framework::ActorClient;
use cafe_orders::coordinator::{OrderLineRequest, OrderServiceError, PlaceOrder, Shortfall};
use cafe_orders::lifecycle::OrderSystem;
use cafe_orders::model::{
    CustomerCreate, CustomerId, IngredientCreate, IngredientId, IngredientUpdate, MenuItemCreate,
    MenuItemId, MenuItemUpdate, OrderId, OrderStatus,
};
use cafe_orders::reports::{SearchFilter, SearchQuery};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

async fn customer(system: &OrderSystem, name: &str) -> CustomerId {
    system
        .customer_client
        .create_customer(CustomerCreate::new(name))
        .await
        .expect("Failed to create customer")
        .id
}

async fn ingredient(system: &OrderSystem, name: &str, quantity: Decimal) -> IngredientId {
    system
        .inventory_client
        .create_ingredient(IngredientCreate::new(name, "unit", quantity))
        .await
        .expect("Failed to create ingredient")
        .id
}

async fn quantity(system: &OrderSystem, id: IngredientId) -> Decimal {
    system
        .inventory_client
        .quantity(id)
        .await
        .expect("Failed to read quantity")
}

/// stock {flour: 10, milk: 4}; Latte needs one milk. Five lattes must be refused
/// with milk short by one, and nothing may change.
#[tokio::test]
async fn test_latte_shortfall_leaves_stock_untouched() {
    let system = OrderSystem::new();
    let alice = customer(&system, "Alice").await;
    let flour = ingredient(&system, "flour", dec!(10)).await;
    let milk = ingredient(&system, "milk", dec!(4)).await;
    let latte = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Latte", dec!(4.50)).with_ingredient(milk, dec!(1)))
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(alice).line(latte.id, 5))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderServiceError::InsufficientInventory(vec![Shortfall::new(
            milk,
            "milk",
            "unit",
            dec!(5),
            dec!(4)
        )])
    );
    assert_eq!(quantity(&system, milk).await, dec!(4));
    assert_eq!(quantity(&system, flour).await, dec!(10));
    assert!(system.coordinator.list_orders().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_successful_order_deducts_and_prices() {
    let system = OrderSystem::new();
    let bob = customer(&system, "Bob").await;
    let milk = ingredient(&system, "milk", dec!(10)).await;
    let beans = ingredient(&system, "beans", dec!(100)).await;
    let flat_white = system
        .menu_client
        .create_menu_item(
            MenuItemCreate::new("Flat white", dec!(3.80))
                .with_ingredient(milk, dec!(0.2))
                .with_ingredient(beans, dec!(18)),
        )
        .await
        .unwrap();

    let order = system
        .coordinator
        .place_order(
            PlaceOrder::new(bob)
                .with_line(OrderLineRequest::new(flat_white.id, 2).with_customizations("oat"))
                .with_instructions("table 4")
                .paid_with("card"),
        )
        .await
        .expect("Order should be placed");

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_price, dec!(7.60));
    assert_eq!(order.lines[0].unit_price, dec!(3.80));
    assert_eq!(order.lines[0].item_name, "Flat white");
    assert_eq!(order.lines[0].customizations, "oat");
    assert_eq!(order.payment_method, "card");
    assert_eq!(quantity(&system, milk).await, dec!(9.6));
    assert_eq!(quantity(&system, beans).await, dec!(64));

    let fetched = system.coordinator.get_order(order.id).await.unwrap();
    assert_eq!(fetched, order);

    system.shutdown().await.unwrap();
}

/// Stock 5, two lines of 3 of the same item: the requirement is 6, not 3.
#[tokio::test]
async fn test_lines_are_summed_before_the_check() {
    let system = OrderSystem::new();
    let carol = customer(&system, "Carol").await;
    let dough = ingredient(&system, "dough", dec!(5)).await;
    let bun = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Bun", dec!(2)).with_ingredient(dough, dec!(1)))
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(carol).line(bun.id, 3).line(bun.id, 3))
        .await
        .unwrap_err();
    let OrderServiceError::InsufficientInventory(shortfalls) = err else {
        panic!("expected InsufficientInventory, got {err:?}");
    };
    assert_eq!(shortfalls[0].required, dec!(6));
    assert_eq!(quantity(&system, dough).await, dec!(5));

    // Sequentially the first fits and the second finds only 2 left.
    system
        .coordinator
        .place_order(PlaceOrder::new(carol).line(bun.id, 3))
        .await
        .unwrap();
    let err = system
        .coordinator
        .place_order(PlaceOrder::new(carol).line(bun.id, 3))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderServiceError::InsufficientInventory(vec![Shortfall::new(
            dough,
            "dough",
            "unit",
            dec!(3),
            dec!(2)
        )])
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_every_short_ingredient_is_reported() {
    let system = OrderSystem::new();
    let dan = customer(&system, "Dan").await;
    let milk = ingredient(&system, "milk", dec!(1)).await;
    let cocoa = ingredient(&system, "cocoa", dec!(0)).await;
    let sugar = ingredient(&system, "sugar", dec!(50)).await;
    let mocha = system
        .menu_client
        .create_menu_item(
            MenuItemCreate::new("Mocha", dec!(4.80))
                .with_ingredient(milk, dec!(1))
                .with_ingredient(cocoa, dec!(2))
                .with_ingredient(sugar, dec!(5)),
        )
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(dan).line(mocha.id, 2))
        .await
        .unwrap_err();
    let OrderServiceError::InsufficientInventory(shortfalls) = err else {
        panic!("expected InsufficientInventory, got {err:?}");
    };
    let short: Vec<IngredientId> = shortfalls.iter().map(|s| s.ingredient_id).collect();
    assert_eq!(short, vec![milk, cocoa]);
    assert_eq!(quantity(&system, sugar).await, dec!(50));

    system.shutdown().await.unwrap();
}

/// Many concurrent orders compete for a scarce ingredient: exactly as many succeed
/// as the stock allows and the rest are refused for that ingredient.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_orders_never_oversell() {
    let system = OrderSystem::new();
    let eve = customer(&system, "Eve").await;
    let milk = ingredient(&system, "milk", dec!(10)).await;
    let cups = ingredient(&system, "cups", dec!(1000)).await;
    let cortado = system
        .menu_client
        .create_menu_item(
            MenuItemCreate::new("Cortado", dec!(3.20))
                .with_ingredient(cups, dec!(1))
                .with_ingredient(milk, dec!(1)),
        )
        .await
        .unwrap();

    let coordinator = Arc::new(system.coordinator.clone());
    let cortado = cortado.id;
    let mut tasks = Vec::new();
    for _ in 0..30 {
        let coordinator = coordinator.clone();
        tasks.push(tokio::spawn(async move {
            coordinator
                .place_order(PlaceOrder::new(eve).line(cortado, 1))
                .await
        }));
    }

    let mut placed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => placed += 1,
            Err(OrderServiceError::InsufficientInventory(shortfalls)) => {
                assert_eq!(shortfalls.len(), 1);
                assert_eq!(shortfalls[0].ingredient_id, milk);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(placed, 10);
    assert_eq!(quantity(&system, milk).await, Decimal::ZERO);
    assert_eq!(quantity(&system, cups).await, dec!(990));
    assert_eq!(system.coordinator.list_orders().await.unwrap().len(), 10);

    drop(coordinator);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_captured_price_survives_menu_change() {
    let system = OrderSystem::new();
    let fay = customer(&system, "Fay").await;
    let tea = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Tea", dec!(2.00)))
        .await
        .unwrap();

    let order = system
        .coordinator
        .place_order(PlaceOrder::new(fay).line(tea.id, 3))
        .await
        .unwrap();
    system
        .menu_client
        .update_menu_item(
            tea.id,
            MenuItemUpdate {
                price: Some(dec!(2.50)),
                ..MenuItemUpdate::default()
            },
        )
        .await
        .unwrap();

    let stored = system.coordinator.get_order(order.id).await.unwrap();
    assert_eq!(stored.lines[0].unit_price, dec!(2.00));
    assert_eq!(stored.total_price, dec!(6.00));
    assert_eq!(system.menu_client.price(tea.id).await.unwrap(), dec!(2.50));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_status_transitions_are_monotonic() {
    let system = OrderSystem::new();
    let gus = customer(&system, "Gus").await;
    let tea = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Tea", dec!(2)))
        .await
        .unwrap();
    let first = system
        .coordinator
        .place_order(PlaceOrder::new(gus).line(tea.id, 1))
        .await
        .unwrap();
    let second = system
        .coordinator
        .place_order(PlaceOrder::new(gus).line(tea.id, 1))
        .await
        .unwrap();

    let err = system
        .coordinator
        .update_order_status(first.id, OrderStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderServiceError::InvalidTransition { .. }));

    let completed = system
        .coordinator
        .update_order_status(first.id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);

    for to in [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ] {
        let err = system
            .coordinator
            .update_order_status(first.id, to)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderServiceError::InvalidTransition {
                from: OrderStatus::Completed,
                to
            }
        );
    }

    system
        .coordinator
        .update_order_status(second.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    let err = system
        .coordinator
        .update_order_status(second.id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderServiceError::InvalidTransition {
            from: OrderStatus::Cancelled,
            ..
        }
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let system = OrderSystem::new();
    let hal = customer(&system, "Hal").await;
    let milk = ingredient(&system, "milk", dec!(5)).await;
    let latte = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Latte", dec!(4)).with_ingredient(milk, dec!(1)))
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(CustomerId(99)).line(latte.id, 1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderServiceError::NotFound {
            entity: "Customer",
            id: "customer_99".into()
        }
    );

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(hal).line(latte.id, 1).line(MenuItemId(42), 1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderServiceError::NotFound {
            entity: "MenuItem",
            id: "menu_item_42".into()
        }
    );
    assert_eq!(quantity(&system, milk).await, dec!(5));

    let err = system
        .coordinator
        .get_order(OrderId(7))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderServiceError::NotFound { entity: "Order", .. }));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleted_ingredient_in_recipe_is_not_found() {
    let system = OrderSystem::new();
    let ivy = customer(&system, "Ivy").await;
    let syrup = ingredient(&system, "syrup", dec!(5)).await;
    let milk = ingredient(&system, "milk", dec!(5)).await;
    let latte = system
        .menu_client
        .create_menu_item(
            MenuItemCreate::new("Vanilla latte", dec!(5))
                .with_ingredient(milk, dec!(1))
                .with_ingredient(syrup, dec!(1)),
        )
        .await
        .unwrap();
    system.inventory_client.delete(syrup).await.unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(ivy).line(latte.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderServiceError::NotFound {
            entity: "Ingredient",
            ..
        }
    ));
    assert_eq!(quantity(&system, milk).await, dec!(5));

    system.shutdown().await.unwrap();
}

/// A price the menu accepts can still overflow once multiplied. The placement is
/// refused up front and the order store keeps serving.
#[tokio::test]
async fn test_overflowing_price_is_refused_and_store_survives() {
    let system = OrderSystem::new();
    let nia = customer(&system, "Nia").await;
    let leaf = ingredient(&system, "gold leaf", dec!(10)).await;
    let gold = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Gold", Decimal::MAX).with_ingredient(leaf, dec!(1)))
        .await
        .unwrap();
    let tea = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Tea", dec!(2)))
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(nia).line(gold.id, 2))
        .await
        .unwrap_err();
    assert!(
        matches!(err, OrderServiceError::Validation(_)),
        "expected Validation, got {err:?}"
    );
    assert_eq!(quantity(&system, leaf).await, dec!(10));

    let order = system
        .coordinator
        .place_order(PlaceOrder::new(nia).line(tea.id, 1))
        .await
        .expect("the order store should still be running");
    assert_eq!(order.total_price, dec!(2));
    assert_eq!(system.coordinator.list_orders().await.unwrap(), vec![order]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_order_and_validation() {
    let system = OrderSystem::new();
    let jo = customer(&system, "Jo").await;
    let tea = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Tea", dec!(2)))
        .await
        .unwrap();

    let err = system
        .coordinator
        .place_order(PlaceOrder::new(jo))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderServiceError::Validation(_)));

    let order = system
        .coordinator
        .place_order(PlaceOrder::new(jo).line(tea.id, 1))
        .await
        .unwrap();
    system.coordinator.delete_order(order.id).await.unwrap();
    assert!(system.coordinator.list_orders().await.unwrap().is_empty());
    assert!(matches!(
        system.coordinator.delete_order(order.id).await,
        Err(OrderServiceError::NotFound { .. })
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_admin_update_and_low_stock() {
    let system = OrderSystem::new();
    let kim = customer(&system, "Kim").await;
    let milk = system
        .inventory_client
        .create_ingredient(IngredientCreate::new("milk", "l", dec!(3)).with_reorder_level(dec!(1)))
        .await
        .unwrap()
        .id;
    let latte = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Latte", dec!(4)).with_ingredient(milk, dec!(1)))
        .await
        .unwrap();

    assert!(system.inventory_client.low_stock().await.unwrap().is_empty());
    system
        .coordinator
        .place_order(PlaceOrder::new(kim).line(latte.id, 2))
        .await
        .unwrap();
    let low = system.inventory_client.low_stock().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, milk);

    let restocked = system
        .inventory_client
        .update_ingredient(
            milk,
            IngredientUpdate {
                quantity: Some(dec!(12)),
                ..IngredientUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restocked.quantity, dec!(12));
    assert!(system.inventory_client.low_stock().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reports_and_search() {
    let system = OrderSystem::new();
    let lena = customer(&system, "Lena Park").await;
    let max = customer(&system, "Max Ruiz").await;
    let latte = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Latte", dec!(4.50)).with_description("milky"))
        .await
        .unwrap();
    let scone = system
        .menu_client
        .create_menu_item(MenuItemCreate::new("Scone", dec!(2.75)).with_description("with jam"))
        .await
        .unwrap();

    let coordinator = &system.coordinator;
    let a = coordinator
        .place_order(PlaceOrder::new(lena).line(latte.id, 2).line(scone.id, 1))
        .await
        .unwrap();
    let b = coordinator
        .place_order(PlaceOrder::new(max).line(latte.id, 1))
        .await
        .unwrap();
    coordinator
        .place_order(PlaceOrder::new(max).line(scone.id, 4))
        .await
        .unwrap();
    coordinator
        .update_order_status(a.id, OrderStatus::Completed)
        .await
        .unwrap();
    coordinator
        .update_order_status(b.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let reports = &system.reports;
    // only the completed order counts: 2 × 4.50 + 2.75
    assert_eq!(reports.total_revenue().await.unwrap(), dec!(11.75));

    let popular = reports.popular_items(10).await.unwrap();
    assert_eq!(popular[0].item_name, "Latte");
    assert_eq!(popular[0].ordered_times, 2);
    assert_eq!(popular[1].item_name, "Scone");
    assert_eq!(reports.popular_items(1).await.unwrap().len(), 1);

    let now = Utc::now();
    let months = reports.orders_by_month(now.year()).await.unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months.iter().map(|m| m.orders).sum::<usize>(), 3);
    let days = reports.orders_by_day(now.year(), now.month()).await.unwrap();
    assert_eq!(days[now.day0() as usize].orders, 3);
    assert!(matches!(
        reports.orders_by_day(now.year(), 13).await,
        Err(OrderServiceError::Validation(_))
    ));

    let hits = reports.search(&SearchQuery::new("JAM")).await.unwrap();
    assert_eq!(hits.menu_items.len(), 1);
    assert_eq!(hits.menu_items[0].name, "Scone");
    assert!(hits.orders.is_empty());

    let hits = reports
        .search(&SearchQuery::new("ruiz").only(SearchFilter::Orders))
        .await
        .unwrap();
    assert!(hits.menu_items.is_empty());
    assert_eq!(hits.orders.len(), 2);
    assert!(hits.orders.iter().all(|hit| hit.customer_name == "Max Ruiz"));

    let hits = reports
        .search(&SearchQuery::new("a").priced_between(Some(dec!(3)), Some(dec!(5))))
        .await
        .unwrap();
    assert!(hits.menu_items.iter().all(|item| item.name == "Latte"));
    assert!(hits.orders.iter().all(|hit| hit.unit_price == dec!(4.50)));

    assert!(matches!(
        reports.search(&SearchQuery::new("  ")).await,
        Err(OrderServiceError::Validation(_))
    ));
    assert!(matches!(
        reports
            .search(&SearchQuery::new("latte").priced_between(Some(dec!(5)), Some(dec!(1))))
            .await,
        Err(OrderServiceError::Validation(_))
    ));

    system.shutdown().await.unwrap();
}
