//! # Inventory Client
//!
//! High-level API for the inventory ledger, plus the per-ingredient claims that let
//! a caller hold several rows still across multiple round-trips.
use super::{classify, Mapped};
use crate::inventory_actor::{IngredientError, InventoryAction};
use crate::model::{Ingredient, IngredientCreate, IngredientId, IngredientUpdate};
use actor_framework::{ActorClient, Claim, FrameworkError, KeyedLocks, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for interacting with the inventory actor.
///
/// Clones share one claim registry, so a claim taken through any clone excludes
/// every other clone.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Ingredient>,
    claims: Arc<KeyedLocks<IngredientId>>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<Ingredient>) -> Self {
        Self {
            inner,
            claims: Arc::new(KeyedLocks::new()),
        }
    }
}

#[async_trait]
impl ActorClient<Ingredient> for InventoryClient {
    type Error = IngredientError;

    fn inner(&self) -> &ResourceClient<Ingredient> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> IngredientError {
        match classify(e) {
            Mapped::Entity(err) => err,
            Mapped::NotFound(id) => IngredientError::NotFound(id),
            Mapped::Transport(msg) => IngredientError::ActorCommunicationError(msg),
        }
    }
}

impl InventoryClient {
    #[instrument(skip(self))]
    pub async fn create_ingredient(
        &self,
        params: IngredientCreate,
    ) -> Result<Ingredient, IngredientError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Administrative correction of a row.
    ///
    /// Waits for the ingredient's claim, so it never lands between the sufficiency
    /// check and the deduction of an order being placed.
    #[instrument(skip(self))]
    pub async fn update_ingredient(
        &self,
        id: IngredientId,
        update: IngredientUpdate,
    ) -> Result<Ingredient, IngredientError> {
        let _claim = self.claim([id]).await;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Current quantity on hand.
    #[instrument(skip(self))]
    pub async fn quantity(&self, id: IngredientId) -> Result<Decimal, IngredientError> {
        self.act(id, InventoryAction::Quantity).await
    }

    /// Atomically take `amount` if that much is on hand; returns what is left.
    #[instrument(skip(self))]
    pub async fn try_deduct(
        &self,
        id: IngredientId,
        amount: Decimal,
    ) -> Result<Decimal, IngredientError> {
        debug!(%id, %amount, "Deducting");
        self.act(id, InventoryAction::TryDeduct(amount)).await
    }

    /// Put `amount` back; returns the new quantity.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: IngredientId, amount: Decimal) -> Result<Decimal, IngredientError> {
        debug!(%id, %amount, "Restocking");
        self.act(id, InventoryAction::Restock(amount)).await
    }

    /// Exclusive claim on the given ingredients, released when dropped.
    ///
    /// Claims are taken in ascending id order whatever order `ids` is in, so two
    /// callers claiming overlapping sets cannot deadlock.
    pub async fn claim(&self, ids: impl IntoIterator<Item = IngredientId>) -> Claim<IngredientId> {
        self.claims.claim(ids).await
    }

    /// Ingredients at or below their reorder level.
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<Ingredient>, IngredientError> {
        let rows = self.list().await?;
        Ok(rows.into_iter().filter(Ingredient::needs_reorder).collect())
    }

    async fn act(&self, id: IngredientId, action: InventoryAction) -> Result<Decimal, IngredientError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
