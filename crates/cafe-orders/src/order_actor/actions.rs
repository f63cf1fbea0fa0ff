use crate::model::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Move the order to a new status. Fails with
    /// [`OrderError::InvalidTransition`](super::OrderError::InvalidTransition) for
    /// anything the lifecycle does not allow. Answers with the updated order.
    Transition(OrderStatus),
}
