//! An inventory row: one ingredient and how much of it is on hand.
//!
//! # Actor Framework
//! [`Ingredient`] is managed by the inventory ledger actor; see
//! [`inventory_actor`](crate::inventory_actor) for the atomic deduction and
//! restock actions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Ingredients. Ordered, so claims can be taken in a
/// stable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub u32);

impl From<u32> for IngredientId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for IngredientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ingredient_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Unit of measure ("g", "ml", "shots").
    pub unit: String,
    /// Quantity on hand. Never negative.
    pub quantity: Decimal,
    /// At or below this level the ingredient is reported as low stock.
    pub reorder_level: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Payload for adding an ingredient to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub reorder_level: Decimal,
}

/// Administrative correction of an ingredient row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<Decimal>,
    pub reorder_level: Option<Decimal>,
}

impl IngredientCreate {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            quantity,
            reorder_level: Decimal::ZERO,
        }
    }

    pub fn with_reorder_level(mut self, reorder_level: Decimal) -> Self {
        self.reorder_level = reorder_level;
        self
    }
}
