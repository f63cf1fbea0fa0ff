//! Error taxonomy of the order service.

use crate::customer_actor::CustomerError;
use crate::inventory_actor::IngredientError;
use crate::menu_actor::MenuError;
use crate::model::{IngredientId, OrderStatus};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// One ingredient an order needs more of than is on hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortfall {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub unit: String,
    pub required: Decimal,
    pub available: Decimal,
    /// `required - available`, always positive.
    pub shortfall: Decimal,
}

impl Shortfall {
    pub fn new(
        ingredient_id: IngredientId,
        name: impl Into<String>,
        unit: impl Into<String>,
        required: Decimal,
        available: Decimal,
    ) -> Self {
        Self {
            ingredient_id,
            name: name.into(),
            unit: unit.into(),
            required,
            available,
            shortfall: required - available,
        }
    }
}

impl Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {} {unit}, have {} {unit}, short {} {unit})",
            self.name,
            self.required,
            self.available,
            self.shortfall,
            unit = self.unit
        )
    }
}

fn list(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(Shortfall::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything an order-service operation can fail with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderServiceError {
    /// Malformed input: no lines, a zero quantity, an empty search.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Every deficient ingredient of the order, not just the first one found.
    #[error("Insufficient inventory: {}", list(.0))]
    InsufficientInventory(Vec<Shortfall>),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A collaborator could not be reached or could not store the result.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl OrderServiceError {
    pub(crate) fn not_found(entity: &'static str, id: impl Display) -> Self {
        OrderServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<CustomerError> for OrderServiceError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::NotFound(id) => Self::NotFound {
                entity: "Customer",
                id,
            },
            CustomerError::Validation(msg) => Self::Validation(msg),
            CustomerError::ActorCommunicationError(msg) => Self::Persistence(msg),
        }
    }
}

impl From<MenuError> for OrderServiceError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(id) => Self::NotFound {
                entity: "MenuItem",
                id,
            },
            MenuError::Validation(msg) => Self::Validation(msg),
            MenuError::ActorCommunicationError(msg) => Self::Persistence(msg),
        }
    }
}

impl From<IngredientError> for OrderServiceError {
    fn from(e: IngredientError) -> Self {
        match e {
            IngredientError::NotFound(id) => Self::NotFound {
                entity: "Ingredient",
                id,
            },
            IngredientError::Insufficient {
                id,
                name,
                unit,
                requested,
                available,
            } => Self::InsufficientInventory(vec![Shortfall::new(
                id, name, unit, requested, available,
            )]),
            IngredientError::Validation(msg) => Self::Validation(msg),
            IngredientError::ActorCommunicationError(msg) => Self::Persistence(msg),
        }
    }
}

impl From<OrderError> for OrderServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => Self::NotFound { entity: "Order", id },
            OrderError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            OrderError::Validation(msg) => Self::Validation(msg),
            OrderError::ActorCommunicationError(msg) => Self::Persistence(msg),
        }
    }
}
