//! # Order Transaction Coordinator
//!
//! Places an order as one all-or-nothing unit across three actors:
//!
//! ```text
//!  validate ─► customer exists? ─► menu snapshot ─► sum requirements, price lines
//!                                                        │
//!        ┌───────────── claim ingredients (ascending id) ┘
//!        ▼
//!  check every row ─► deduct each ─────────────────► store order
//!        │                 │                           │
//!   Insufficient      ─────┴──── on failure: restock ──┘
//!   (nothing touched)            what was deducted
//!        └───────────── release claims ───────────────────────►
//! ```
//!
//! ## Guarantees
//!
//! - Inventory never goes negative: the sufficiency check and the deductions run
//!   under the claims, and each deduction is itself an atomic actor action.
//! - An order is either booked with all its deductions or not booked at all. A
//!   failure after the first deduction restocks everything deducted so far before
//!   the claims are released, so no other placement sees the intermediate state.
//! - Unit prices are copied from one menu snapshot per item; later menu changes
//!   never reach a stored order.
//! - The attempt runs on its own task. A caller that stops waiting does not leave
//!   it half done.
//!
//! Two placements sharing an ingredient serialize on it; the one that goes second
//! sees the committed quantities and fails with
//! [`OrderServiceError::InsufficientInventory`] if they no longer suffice.
//! Placements with disjoint ingredients run in parallel.

mod error;
pub mod requirements;

pub use error::*;

use crate::clients::{CustomerClient, InventoryClient, MenuClient, OrderClient};
use crate::model::{
    CustomerId, IngredientId, MenuItemId, Order, OrderDraft, OrderId, OrderLine, OrderStatus,
};
use actor_framework::ActorClient;
use requirements::MenuSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// One requested line: which item, how many, and free-form customizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub customizations: String,
}

impl OrderLineRequest {
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
            customizations: String::new(),
        }
    }

    pub fn with_customizations(mut self, customizations: impl Into<String>) -> Self {
        self.customizations = customizations.into();
        self
    }
}

/// A proposed order as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLineRequest>,
    pub special_instructions: String,
    pub payment_method: String,
}

impl PlaceOrder {
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            lines: Vec::new(),
            special_instructions: String::new(),
            payment_method: String::new(),
        }
    }

    /// Adds a plain line.
    pub fn line(self, menu_item_id: MenuItemId, quantity: u32) -> Self {
        self.with_line(OrderLineRequest::new(menu_item_id, quantity))
    }

    pub fn with_line(mut self, line: OrderLineRequest) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_instructions(mut self, special_instructions: impl Into<String>) -> Self {
        self.special_instructions = special_instructions.into();
        self
    }

    pub fn paid_with(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }
}

fn validate(request: &PlaceOrder) -> Result<(), OrderServiceError> {
    if request.lines.is_empty() {
        return Err(OrderServiceError::Validation(
            "an order needs at least one line".to_string(),
        ));
    }
    if let Some(line) = request.lines.iter().find(|line| line.quantity == 0) {
        return Err(OrderServiceError::Validation(format!(
            "quantity of {} must be positive",
            line.menu_item_id
        )));
    }
    Ok(())
}

/// The order service. Cheap to clone; every clone talks to the same actors.
#[derive(Clone)]
pub struct OrderCoordinator {
    customers: CustomerClient,
    menu: MenuClient,
    inventory: InventoryClient,
    orders: OrderClient,
}

impl OrderCoordinator {
    pub fn new(
        customers: CustomerClient,
        menu: MenuClient,
        inventory: InventoryClient,
        orders: OrderClient,
    ) -> Self {
        Self {
            customers,
            menu,
            inventory,
            orders,
        }
    }

    /// Check, price, deduct and persist as one unit.
    ///
    /// # Errors
    /// - `Validation`: no lines, a line with quantity 0, or a price or ingredient
    ///   total too large to represent. Raised before any claim is taken.
    /// - `NotFound`: unknown customer, menu item, or an ingredient a recipe names.
    /// - `InsufficientInventory`: lists every short ingredient; nothing was changed.
    /// - `Persistence`: an actor was unreachable or the order could not be stored;
    ///   any deductions were restocked first.
    #[instrument(skip(self, request), fields(customer = %request.customer_id, lines = request.lines.len()))]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, OrderServiceError> {
        let coordinator = self.clone();
        let attempt =
            tokio::spawn(async move { coordinator.place(request).await }.in_current_span());
        attempt.await.map_err(|e| {
            OrderServiceError::Persistence(format!("placement task did not finish: {e}"))
        })?
    }

    async fn place(&self, request: PlaceOrder) -> Result<Order, OrderServiceError> {
        validate(&request)?;
        if !self.customers.exists(request.customer_id).await? {
            return Err(OrderServiceError::not_found("Customer", request.customer_id));
        }

        let menu = self.snapshot_menu(&request).await?;
        let required = requirements::required_ingredients(&request.lines, &menu)?;
        let lines = requirements::price_lines(&request.lines, &menu)?;

        let claim = self.inventory.claim(required.keys().copied()).await;
        debug!(ingredients = ?claim.keys(), "Ingredients claimed");
        self.check_sufficiency(&required).await?;

        let mut applied = Vec::with_capacity(required.len());
        let outcome = self.commit(&request, lines, &required, &mut applied).await;
        if let Err(e) = &outcome {
            warn!(error = %e, deductions = applied.len(), "Placement failed, rolling back");
            self.roll_back(&applied).await;
        }
        outcome
    }

    async fn snapshot_menu(&self, request: &PlaceOrder) -> Result<MenuSnapshot, OrderServiceError> {
        let mut menu = MenuSnapshot::new();
        for line in &request.lines {
            if !menu.contains_key(&line.menu_item_id) {
                let item = self.menu.snapshot(line.menu_item_id).await?;
                menu.insert(line.menu_item_id, item);
            }
        }
        Ok(menu)
    }

    async fn check_sufficiency(
        &self,
        required: &BTreeMap<IngredientId, Decimal>,
    ) -> Result<(), OrderServiceError> {
        let mut shortfalls = Vec::new();
        for (&id, &needed) in required {
            let row = self
                .inventory
                .get(id)
                .await?
                .ok_or_else(|| OrderServiceError::not_found("Ingredient", id))?;
            if row.quantity < needed {
                shortfalls.push(Shortfall::new(id, row.name, row.unit, needed, row.quantity));
            }
        }
        if shortfalls.is_empty() {
            Ok(())
        } else {
            Err(OrderServiceError::InsufficientInventory(shortfalls))
        }
    }

    /// Deducts every requirement, recording each one in `applied` as it lands, then
    /// stores the already priced lines.
    async fn commit(
        &self,
        request: &PlaceOrder,
        lines: Vec<OrderLine>,
        required: &BTreeMap<IngredientId, Decimal>,
        applied: &mut Vec<(IngredientId, Decimal)>,
    ) -> Result<Order, OrderServiceError> {
        for (&id, &amount) in required {
            self.inventory.try_deduct(id, amount).await?;
            applied.push((id, amount));
        }

        let draft = OrderDraft {
            customer_id: request.customer_id,
            lines,
            special_instructions: request.special_instructions.clone(),
            payment_method: request.payment_method.clone(),
        };
        let order = self.orders.insert(draft).await?;
        info!(order = %order.id, total = %order.total_price, "Order placed");
        Ok(order)
    }

    async fn roll_back(&self, applied: &[(IngredientId, Decimal)]) {
        for &(id, amount) in applied.iter().rev() {
            if let Err(e) = self.inventory.restock(id, amount).await {
                error!(ingredient = %id, %amount, error = %e, "Restock during rollback failed");
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderServiceError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| OrderServiceError::not_found("Order", id))
    }

    /// Every stored order, oldest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        Ok(self.orders.list().await?)
    }

    /// PENDING → COMPLETED or PENDING → CANCELLED; anything else is
    /// `InvalidTransition`. Inventory is not touched.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        let order = self.orders.transition(id, status).await?;
        info!(order = %id, status = %order.status, "Status changed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderServiceError> {
        Ok(self.orders.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_zero_quantity_requests_are_invalid() {
        let empty = PlaceOrder::new(CustomerId(1));
        assert!(matches!(validate(&empty), Err(OrderServiceError::Validation(_))));

        let zero = PlaceOrder::new(CustomerId(1))
            .line(MenuItemId(1), 2)
            .line(MenuItemId(2), 0);
        assert_eq!(
            validate(&zero),
            Err(OrderServiceError::Validation(
                "quantity of menu_item_2 must be positive".into()
            ))
        );
    }
}
