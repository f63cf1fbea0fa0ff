//! # Order Actor
//!
//! The order store. It keeps placed orders and enforces exactly one rule itself:
//! the status lifecycle (see [`OrderStatus`](crate::model::OrderStatus)).
//!
//! Orders are created from a priced [`OrderDraft`](crate::model::OrderDraft) and are
//! otherwise immutable. The status check-and-set is an [`OrderAction`], so two
//! concurrent transitions of the same order are serialized by the actor and at most
//! one of them can succeed.
//!
//! ## Testing
//!
//! The order store is the last step of a placement; `tests/coordinator_test.rs`
//! swaps it for a [`MockClient`](actor_framework::mock::MockClient) to exercise the
//! rollback path.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, OrderClient::new(generic_client))
}
