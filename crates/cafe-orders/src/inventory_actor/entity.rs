//! [`ActorEntity`] implementation for [`Ingredient`].
//!
//! Quantities can never become negative: creation and updates reject negative
//! values, and `TryDeduct` refuses to take more than is on hand.

use super::{IngredientError, InventoryAction};
use crate::model::{Ingredient, IngredientCreate, IngredientId, IngredientUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;

fn non_negative(field: &str, value: Decimal) -> Result<Decimal, IngredientError> {
    if value < Decimal::ZERO {
        return Err(IngredientError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(value)
}

fn non_empty(field: &str, value: String) -> Result<String, IngredientError> {
    if value.trim().is_empty() {
        return Err(IngredientError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(value)
}

fn positive(value: Decimal) -> Result<Decimal, IngredientError> {
    if value <= Decimal::ZERO {
        return Err(IngredientError::Validation(format!(
            "amount must be positive, got {value}"
        )));
    }
    Ok(value)
}

#[async_trait]
impl ActorEntity for Ingredient {
    type Id = IngredientId;
    type Create = IngredientCreate;
    type Update = IngredientUpdate;
    type Action = InventoryAction;
    type ActionResult = Decimal;
    type Context = ();
    type Error = IngredientError;

    fn from_create_params(
        id: IngredientId,
        params: IngredientCreate,
    ) -> Result<Self, IngredientError> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: non_empty("name", params.name)?,
            unit: params.unit,
            quantity: non_negative("quantity", params.quantity)?,
            reorder_level: non_negative("reorder level", params.reorder_level)?,
            created_at: now,
            updated_at: now,
        })
    }

    fn id(&self) -> &IngredientId {
        &self.id
    }

    /// Administrative correction. Any non-negative quantity is accepted.
    async fn on_update(&mut self, update: IngredientUpdate, _ctx: &()) -> Result<(), IngredientError> {
        if let Some(name) = update.name {
            self.name = non_empty("name", name)?;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = non_negative("quantity", quantity)?;
        }
        if let Some(reorder_level) = update.reorder_level {
            self.reorder_level = non_negative("reorder level", reorder_level)?;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &(),
    ) -> Result<Decimal, IngredientError> {
        match action {
            InventoryAction::Quantity => Ok(self.quantity),
            InventoryAction::TryDeduct(amount) => {
                let amount = positive(amount)?;
                if amount > self.quantity {
                    return Err(IngredientError::Insufficient {
                        id: self.id,
                        name: self.name.clone(),
                        unit: self.unit.clone(),
                        requested: amount,
                        available: self.quantity,
                    });
                }
                self.quantity -= amount;
                self.updated_at = Utc::now();
                if self.needs_reorder() {
                    warn!(
                        ingredient = %self.id,
                        name = %self.name,
                        quantity = %self.quantity,
                        reorder_level = %self.reorder_level,
                        "Low stock"
                    );
                }
                Ok(self.quantity)
            }
            InventoryAction::Restock(amount) => {
                self.quantity = self
                    .quantity
                    .checked_add(positive(amount)?)
                    .ok_or_else(|| {
                        IngredientError::Validation(format!(
                            "restocking {amount} would exceed the representable quantity"
                        ))
                    })?;
                self.updated_at = Utc::now();
                Ok(self.quantity)
            }
        }
    }
}
