//! # Order Client
//!
//! High-level API for the order store. It persists what it is given; pricing and
//! inventory live in the [`OrderCoordinator`](crate::coordinator::OrderCoordinator).
use super::{classify, Mapped};
use crate::model::{Order, OrderDraft, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Store a priced draft as a new PENDING order.
    #[instrument(skip(self, draft), fields(customer = %draft.customer_id, lines = draft.lines.len()))]
    pub async fn insert(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.create(draft).await.map_err(Self::map_error)?;
        info!(order = %order.id, total = %order.total_price, "Order stored");
        Ok(order)
    }

    /// Move an order along its lifecycle; the check and the change happen as one
    /// step inside the actor.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match classify(e) {
            Mapped::Entity(err) => err,
            Mapped::NotFound(id) => OrderError::NotFound(id),
            Mapped::Transport(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn transition_sends_target_status_and_recovers_rejection() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task =
            tokio::spawn(async move { orders.transition(OrderId(1), OrderStatus::Pending).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(1));
        assert_eq!(action, OrderAction::Transition(OrderStatus::Pending));

        let rejection = OrderError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Pending,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(rejection.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), rejection);
    }
}
