use crate::model::IngredientId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IngredientError {
    #[error("Ingredient not found: {0}")]
    NotFound(String),

    /// A deduction would have driven the quantity below zero.
    #[error("Insufficient {name}: requested {requested} {unit}, available {available} {unit}")]
    Insufficient {
        id: IngredientId,
        name: String,
        unit: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid ingredient: {0}")]
    Validation(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
