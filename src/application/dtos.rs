use crate::domain::order::{Order, OrderItem, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment rails accepted by the gateway. Opaque to this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Pix,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderItemDto {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Serializable snapshot of an order, returned across the core boundary and
/// handed to the payment gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderDto {
    pub id: Uuid,
    pub customer_id: Option<String>,
    pub items: Vec<OrderItemDto>,
    pub status: OrderStatus,
    pub total: Decimal,
}

impl OrderDto {
    pub fn from_entity(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer_id: order.customer_id().map(str::to_string),
            items: order.items().iter().map(OrderItemDto::from_entity).collect(),
            status: order.status(),
            total: order.total(),
        }
    }
}

impl OrderItemDto {
    fn from_entity(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            product_name: item.product_name.clone(),
            unit_price: item.unit_price.value(),
            quantity: item.quantity.value(),
            subtotal: item.subtotal(),
        }
    }
}

/// Gateway-issued checkout confirmation. Returned to the caller verbatim and
/// never persisted by this core.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CheckoutDto {
    pub order_id: Uuid,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub qr_code: String,
}
