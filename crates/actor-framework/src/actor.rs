//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one entity type and processes requests one
//! at a time on its own task. Exclusive ownership of the store inside that task is
//! what makes every single-entity operation atomic without a `Mutex`.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(capacity)` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) to `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a tokio task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bean { id: u32, origin: String }
/// #[derive(Debug)] struct BeanCreate { origin: String }
/// #[derive(Debug)] struct BeanUpdate;
/// #[derive(Debug)] enum BeanAction {}
/// #[derive(Debug, thiserror::Error)] #[error("bean error")] struct BeanError;
///
/// #[async_trait]
/// impl ActorEntity for Bean {
///     type Id = u32; type Create = BeanCreate; type Update = BeanUpdate;
///     type Action = BeanAction; type ActionResult = (); type Context = (); type Error = BeanError;
///
///     fn from_create_params(id: u32, p: BeanCreate) -> Result<Self, BeanError> {
///         Ok(Self { id, origin: p.origin })
///     }
///     fn id(&self) -> &u32 { &self.id }
///     async fn on_update(&mut self, _: BeanUpdate, _: &()) -> Result<(), BeanError> { Ok(()) }
///     async fn handle_action(&mut self, a: BeanAction, _: &()) -> Result<(), BeanError> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Bean>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let bean = client.create(BeanCreate { origin: "Yirgacheffe".into() }).await.unwrap();
///     assert_eq!(bean.id, 1);
///     assert_eq!(client.list().await.unwrap().len(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Ingredient" instead of "cafe_orders::model::ingredient::Ingredient"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    self.handle_create(params, respond_to, &context).await
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => self.handle_update(id, update, respond_to, &context).await,
                ResourceRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to, &context).await
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => self.handle_action(id, action, respond_to, &context).await,
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle_create(&mut self, params: T::Create, respond_to: Response<T>, ctx: &T::Context) {
        let entity_type = self.entity_type;
        debug!(entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);

        let mut item = match T::from_create_params(id.clone(), params) {
            Ok(item) => item,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                return;
            }
        };
        if let Err(e) = item.on_create(ctx).await {
            warn!(entity_type, error = %e, "on_create failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }

        // ids are only consumed by entities that were actually stored
        self.next_id += 1;
        self.store.insert(id.clone(), item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        let _ = respond_to.send(Ok(item));
    }

    async fn handle_update(
        &mut self,
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
        ctx: &T::Context,
    ) {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?update, "Update");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        // Updates are applied to a copy so a failing hook leaves the stored entity untouched.
        let mut next = item.clone();
        match next.on_update(update, ctx).await {
            Ok(()) => {
                *item = next.clone();
                info!(entity_type, %id, "Updated");
                let _ = respond_to.send(Ok(next));
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Update failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            }
        }
    }

    async fn handle_delete(&mut self, id: T::Id, respond_to: Response<()>, ctx: &T::Context) {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, "Delete");
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        if let Err(e) = item.on_delete(ctx).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        let _ = respond_to.send(Ok(()));
    }

    async fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
        ctx: &T::Context,
    ) {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?action, "Action");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        // Same copy-then-commit rule as updates: a failed action changes nothing.
        let mut next = item.clone();
        let result = next
            .handle_action(action, ctx)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(_) => {
                *item = next;
                info!(entity_type, %id, "Action ok");
            }
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        let _ = respond_to.send(result);
    }
}
