//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store trusts the coordinator for pricing but still refuses drafts that could
//! never have come from a valid placement (no lines, zero quantities, a total too
//! large to represent).

use super::{OrderAction, OrderError};
use crate::model::{Order, OrderDraft, OrderId, OrderStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    /// Orders have no field-level updates; status moves through [`OrderAction`].
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, draft: OrderDraft) -> Result<Self, OrderError> {
        if draft.lines.is_empty() {
            return Err(OrderError::Validation(
                "an order needs at least one line".to_string(),
            ));
        }
        if let Some(line) = draft.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "quantity of {} must be positive",
                line.menu_item_id
            )));
        }

        let total_price = draft.total_price().ok_or_else(|| {
            OrderError::Validation("order total exceeds the representable amount".to_string())
        })?;

        let now = Utc::now();
        Ok(Self {
            id,
            total_price,
            customer_id: draft.customer_id,
            lines: draft.lines,
            special_instructions: draft.special_instructions,
            status: OrderStatus::Pending,
            payment_method: draft.payment_method,
            created_at: now,
            updated_at: now,
        })
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), OrderError> {
        match update {}
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::Transition(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
                self.updated_at = Utc::now();
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, MenuItemId, OrderLine};
    use rust_decimal_macros::dec;

    fn draft(quantity: u32) -> OrderDraft {
        OrderDraft {
            customer_id: CustomerId(1),
            lines: vec![OrderLine {
                menu_item_id: MenuItemId(1),
                item_name: "Flat white".into(),
                quantity,
                customizations: "extra hot".into(),
                unit_price: dec!(3.80),
            }],
            special_instructions: String::new(),
            payment_method: "cash".into(),
        }
    }

    #[test]
    fn stored_order_starts_pending_with_computed_total() {
        let order = Order::from_create_params(OrderId(1), draft(3)).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, dec!(11.40));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let err = Order::from_create_params(OrderId(1), draft(0)).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let mut draft = draft(2);
        draft.lines[0].unit_price = rust_decimal::Decimal::MAX;
        let err = Order::from_create_params(OrderId(1), draft).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn completed_order_cannot_be_cancelled() {
        let mut order = Order::from_create_params(OrderId(1), draft(1)).unwrap();
        order
            .handle_action(OrderAction::Transition(OrderStatus::Completed), &())
            .await
            .unwrap();

        let err = order
            .handle_action(OrderAction::Transition(OrderStatus::Cancelled), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Cancelled,
            }
        );
    }
}
