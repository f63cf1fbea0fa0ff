//! # Menu Actor
//!
//! The menu catalog: sellable items with their price and bill of materials.
//! Read-only from the order coordinator's point of view; it takes one snapshot per
//! item so price and ingredients always come from the same version of the item.

pub mod entity;
pub mod error;

pub use entity::MenuAction;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::MenuItem;
use actor_framework::ResourceActor;

/// Creates a new Menu actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, MenuClient::new(generic_client))
}
