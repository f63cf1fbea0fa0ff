//! Custom actions for the inventory ledger.

use rust_decimal::Decimal;

/// Single-row ledger operations. Each one answers with the quantity on hand once
/// it has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryAction {
    /// Read the quantity without changing it.
    Quantity,
    /// Decrement by the amount, or fail with
    /// [`IngredientError::Insufficient`](super::IngredientError::Insufficient)
    /// and leave the row untouched.
    TryDeduct(Decimal),
    /// Increment by the amount. Used to undo a deduction.
    Restock(Decimal),
}
