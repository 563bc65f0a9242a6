use crate::application::dtos::OrderDto;
use crate::domain::ports::{OrderRepository, OrderRepositoryRef};
use crate::error::{OrderError, Result};
use uuid::Uuid;

/// Marks a persisted order as paid once the gateway's asynchronous
/// confirmation arrives. Invoked through the event manager, keyed by order id.
#[derive(Clone)]
pub struct ConfirmPaymentUseCase {
    order_repository: OrderRepositoryRef,
}

impl ConfirmPaymentUseCase {
    pub fn new(order_repository: OrderRepositoryRef) -> Self {
        Self { order_repository }
    }

    pub async fn execute(&self, order_id: Uuid) -> Result<OrderDto> {
        let mut order = self
            .order_repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("order {order_id}")))?;

        order.confirm_payment()?;
        self.order_repository.update(order.clone()).await?;
        tracing::info!(%order_id, "payment confirmed");

        Ok(OrderDto::from_entity(&order))
    }
}
