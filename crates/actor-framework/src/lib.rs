//! # Actor Framework
//!
//! Building blocks for type-safe, resource-oriented actor systems on Tokio.
//!
//! Each resource type (customers, ingredients, menu items, orders, ...) gets one
//! [`ResourceActor`] that owns its store and processes requests sequentially, and any
//! number of cloneable [`ResourceClient`] handles that talk to it over a channel.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the business rules of one resource.
//! 2. **Runtime** ([`ResourceActor`]) - the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed request/response.
//!
//! ## Concurrency Model
//!
//! - One Tokio task per actor; messages are handled one at a time, so an action that
//!   checks and then mutates an entity is atomic.
//! - Different actors run in parallel.
//! - Workflows that must hold several entities still across multiple round-trips
//!   claim them through [`KeyedLocks`].
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor,
//! so actors can be created first and wired afterwards.
//!
//! ## Testing
//!
//! [`mock::MockClient`] and [`mock::create_mock_client`] stand in for a real actor
//! when testing code that sits on top of a client.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod locks;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use locks::{Claim, KeyedLocks};
pub use message::{ResourceRequest, Response};
