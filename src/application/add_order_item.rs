use crate::application::dtos::OrderDto;
use crate::domain::order::Quantity;
use crate::domain::ports::{
    OrderRepository, OrderRepositoryRef, ProductRepository, ProductRepositoryRef,
};
use crate::error::{OrderError, Result};
use uuid::Uuid;

pub struct AddOrderItemRequest {
    pub product_id: String,
    pub quantity: u32,
    pub order_id: Uuid,
}

/// Appends one line item to an existing open order and persists the change.
pub struct AddOrderItemUseCase {
    order_repository: OrderRepositoryRef,
    product_repository: ProductRepositoryRef,
}

impl AddOrderItemUseCase {
    pub fn new(
        order_repository: OrderRepositoryRef,
        product_repository: ProductRepositoryRef,
    ) -> Self {
        Self {
            order_repository,
            product_repository,
        }
    }

    pub async fn execute(&self, request: AddOrderItemRequest) -> Result<OrderDto> {
        let quantity = Quantity::new(request.quantity)?;

        let product = self
            .product_repository
            .find_by_id(&request.product_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("product {}", request.product_id)))?;

        let mut order = self
            .order_repository
            .find_by_id(request.order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("order {}", request.order_id)))?;

        order.add_item(&product, quantity)?;
        self.order_repository.update(order.clone()).await?;
        tracing::debug!(
            order_id = %order.id(),
            product_id = %request.product_id,
            quantity = request.quantity,
            "order item added"
        );

        Ok(OrderDto::from_entity(&order))
    }
}
