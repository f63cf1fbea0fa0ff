//! # Menu Client
//!
//! High-level API for the menu catalog.
use super::{classify, Mapped};
use crate::menu_actor::MenuError;
use crate::model::{BomEntry, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> MenuError {
        match classify(e) {
            Mapped::Entity(err) => err,
            Mapped::NotFound(id) => MenuError::NotFound(id),
            Mapped::Transport(msg) => MenuError::ActorCommunicationError(msg),
        }
    }
}

impl MenuClient {
    #[instrument(skip(self))]
    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// The item as it is right now; `NotFound` when it does not exist.
    pub async fn snapshot(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        self.get(id)
            .await?
            .ok_or_else(|| MenuError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn price(&self, id: MenuItemId) -> Result<Decimal, MenuError> {
        Ok(self.snapshot(id).await?.price)
    }

    #[instrument(skip(self))]
    pub async fn bill_of_materials(&self, id: MenuItemId) -> Result<Vec<BomEntry>, MenuError> {
        Ok(self.snapshot(id).await?.bill_of_materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn price_of_unknown_item_is_not_found() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId(4)).return_ok(None);
        let menu = MenuClient::new(mock.client());

        let err = menu.price(MenuItemId(4)).await.unwrap_err();
        assert_eq!(err, MenuError::NotFound("menu_item_4".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_get(MenuItemId(1))
            .return_err(FrameworkError::ActorClosed);
        let menu = MenuClient::new(mock.client());

        let err = menu.bill_of_materials(MenuItemId(1)).await.unwrap_err();
        assert!(matches!(err, MenuError::ActorCommunicationError(_)));
    }
}
