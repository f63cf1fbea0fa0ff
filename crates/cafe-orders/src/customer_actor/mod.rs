//! # Customer Actor
//!
//! Customer registry. Plain CRUD, no dependencies (`Context = ()`), no custom
//! actions. The coordinator only ever asks it whether a customer exists.
//!
//! ```rust
//! use cafe_orders::customer_actor;
//! use cafe_orders::model::CustomerCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = customer_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let alice = client.create_customer(CustomerCreate::new("Alice Moreau")).await?;
//!     assert!(client.exists(alice.id).await?);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use actor_framework::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, CustomerClient::new(generic_client))
}
