//! # Inventory Actor
//!
//! The ledger: one [`Ingredient`] row per ingredient with its quantity on hand.
//!
//! ## Custom Actions
//!
//! Every mutation of a quantity goes through an [`InventoryAction`], handled as one
//! actor message, so a check-and-decrement can never interleave with another:
//!
//! ```rust,ignore
//! let on_hand = inventory.quantity(milk).await?;
//! let left = inventory.try_deduct(milk, dec!(3)).await?;   // fails if it would go negative
//! inventory.restock(milk, dec!(3)).await?;                  // compensation
//! ```
//!
//! Actions cover a single row. Placing an order touches several rows over several
//! round-trips; the [`InventoryClient`](crate::clients::InventoryClient) hands out
//! claims for that (see [`InventoryClient::claim`](crate::clients::InventoryClient::claim)).
//!
//! ## Low stock
//!
//! A deduction that leaves an ingredient at or below its reorder level is logged at
//! `WARN`; [`InventoryClient::low_stock`](crate::clients::InventoryClient::low_stock)
//! lists every such ingredient.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::InventoryClient;
use crate::model::Ingredient;
use actor_framework::ResourceActor;

/// Creates a new inventory actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Ingredient>, InventoryClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, InventoryClient::new(generic_client))
}
