use crate::application::dtos::{CheckoutDto, OrderDto, PaymentMethod};
use crate::domain::customer::Customer;
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>>;
    async fn insert(&self, order: Order) -> Result<()>;
    async fn update(&self, order: Order) -> Result<()>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_customer_by_id(&self, id: &str) -> Result<Option<Customer>>;
}

/// External payment rail. Given an order snapshot and a payment method it
/// either issues a checkout confirmation or fails.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn execute(&self, order: &OrderDto, method: PaymentMethod) -> Result<CheckoutDto>;
}

/// Deferred callback registered under an event name.
pub type EventHandler = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Fire-and-forget registry of deferred handlers, keyed by event name.
///
/// `add` never blocks on the handler; `dispatch` consumes and runs every
/// handler registered under the event. Dispatching an unknown event is a
/// no-op.
#[async_trait]
pub trait EventManager: Send + Sync {
    async fn add(&self, event: &str, handler: EventHandler);
    async fn dispatch(&self, event: &str);
}

pub type OrderRepositoryRef = Arc<dyn OrderRepository>;
pub type ProductRepositoryRef = Arc<dyn ProductRepository>;
pub type CustomerRepositoryRef = Arc<dyn CustomerRepository>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type EventManagerRef = Arc<dyn EventManager>;
