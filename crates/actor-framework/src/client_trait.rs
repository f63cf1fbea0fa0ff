//! # ActorClient Trait
//!
//! Shared read/delete operations for resource-specific client wrappers.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// Implementors provide access to the inner `ResourceClient` and a mapping from
/// `FrameworkError` to their own error type; `get`, `list` and `delete` come for free.
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Cup { id: u32 }
/// #[derive(Debug)] struct CupCreate;
/// #[derive(Debug)] struct CupUpdate;
/// #[derive(Debug)] enum CupAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct CupError(String);
///
/// #[async_trait]
/// impl ActorEntity for Cup {
///     type Id = u32; type Create = CupCreate; type Update = CupUpdate;
///     type Action = CupAction; type ActionResult = (); type Context = (); type Error = CupError;
///     fn from_create_params(id: u32, _: CupCreate) -> Result<Self, CupError> { Ok(Self { id }) }
///     fn id(&self) -> &u32 { &self.id }
///     async fn on_update(&mut self, _: CupUpdate, _: &()) -> Result<(), CupError> { Ok(()) }
///     async fn handle_action(&mut self, a: CupAction, _: &()) -> Result<(), CupError> { match a {} }
/// }
///
/// struct CupClient { inner: ResourceClient<Cup> }
///
/// #[async_trait]
/// impl ActorClient<Cup> for CupClient {
///     type Error = CupError;
///     fn inner(&self) -> &ResourceClient<Cup> { &self.inner }
///     fn map_error(e: FrameworkError) -> CupError { CupError(e.to_string()) }
/// }
///
/// async fn usage(client: CupClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, ordered by ID.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
