//! Plain data structures and DTOs; each one is managed by its own
//! [`ResourceActor`](actor_framework::ResourceActor).

pub mod customer;
pub mod ingredient;
pub mod menu_item;
pub mod order;

pub use customer::*;
pub use ingredient::*;
pub use menu_item::*;
pub use order::*;
