use crate::application::dtos::OrderDto;
use crate::domain::order::Order;
use crate::domain::ports::{
    CustomerRepository, CustomerRepositoryRef, OrderRepository, OrderRepositoryRef,
};
use crate::error::{OrderError, Result};

/// Opens a new, empty order, optionally tied to a registered customer.
pub struct OpenOrderUseCase {
    order_repository: OrderRepositoryRef,
    customer_repository: CustomerRepositoryRef,
}

impl OpenOrderUseCase {
    pub fn new(
        order_repository: OrderRepositoryRef,
        customer_repository: CustomerRepositoryRef,
    ) -> Self {
        Self {
            order_repository,
            customer_repository,
        }
    }

    pub async fn execute(&self, customer_id: Option<String>) -> Result<OrderDto> {
        if let Some(id) = customer_id.as_deref() {
            self.customer_repository
                .get_customer_by_id(id)
                .await?
                .ok_or_else(|| OrderError::NotFound(format!("customer {id}")))?;
        }

        let order = Order::open(customer_id);
        self.order_repository.insert(order.clone()).await?;
        tracing::info!(order_id = %order.id(), "order opened");

        Ok(OrderDto::from_entity(&order))
    }
}
