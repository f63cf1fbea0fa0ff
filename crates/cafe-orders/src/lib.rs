//! # Cafe Orders
//!
//! Order-processing backend of a cafe, built on `actor-framework`: customers, an
//! ingredient ledger, a menu whose items consume ingredients, and orders that are
//! checked, priced, deducted and stored as one unit.
//!
//! - [`model`]: data structures and DTOs.
//! - [`customer_actor`], [`inventory_actor`], [`menu_actor`], [`order_actor`]: one
//!   resource actor each, with its entity rules and error type.
//! - [`clients`]: typed wrappers around the actors' channels.
//! - [`coordinator`]: the order placement transaction and status changes.
//! - [`reports`]: revenue, popular items, per-period counts and search.
//! - [`lifecycle`]: configuration, start-up and shutdown.

pub mod clients;
pub mod coordinator;
pub mod customer_actor;
pub mod inventory_actor;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod reports;
