//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each wrapper maps [`FrameworkError`] into its actor's own error type. Entity
//! errors cross the channel boxed; they are recovered here by downcasting, so
//! callers match on `IngredientError::Insufficient` rather than on strings.

pub mod customer_client;
pub mod inventory_client;
pub mod menu_client;
pub mod order_client;

pub use customer_client::*;
pub use inventory_client::*;
pub use menu_client::*;
pub use order_client::*;

use actor_framework::FrameworkError;

/// How a framework error lands in a per-actor error type.
enum Mapped<E> {
    Entity(E),
    NotFound(String),
    Transport(String),
}

fn classify<E>(e: FrameworkError) -> Mapped<E>
where
    E: std::error::Error + Clone + 'static,
{
    if let Some(inner) = e.entity_error::<E>() {
        return Mapped::Entity(inner.clone());
    }
    match e {
        FrameworkError::NotFound(id) => Mapped::NotFound(id),
        other => Mapped::Transport(other.to_string()),
    }
}
