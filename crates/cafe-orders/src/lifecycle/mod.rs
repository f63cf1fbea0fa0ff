//! # System Lifecycle
//!
//! Creates every actor, starts it on its own task, builds the services that sit on
//! top of the clients and tears everything down again.
//!
//! ## Wiring
//!
//! ```text
//!  customer_actor ◄─┐
//!  menu_actor     ◄─┼── OrderCoordinator ── place_order / status / delete
//!  inventory_actor◄─┤
//!  order_actor    ◄─┴── Reports ── revenue / popular items / by period / search
//! ```
//!
//! Dependencies are handed over as clients, never as globals. Actors get theirs
//! through `run(context)` (late binding); the four resource actors here happen to
//! need none.
//!
//! ## Graceful Shutdown
//!
//! 1. Drop all clients. The mailboxes close.
//! 2. Each actor's `recv()` returns `None` after the queued requests are served.
//! 3. Await every actor task.
//!
//! ## Configuration
//!
//! [`SystemConfig::from_env`] reads `CAFE_MAILBOX_CAPACITY` (default 32).
//! Logging is configured through `RUST_LOG`, see
//! [`actor_framework::tracing::setup_tracing`].

pub mod config;
pub mod order_system;

pub use config::*;
pub use order_system::*;
