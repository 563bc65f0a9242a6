use crate::domain::customer::Customer;
use crate::domain::order::Order;
use crate::domain::ports::{
    CustomerRepository, EventHandler, EventManager, OrderRepository, ProductRepository,
};
use crate::domain::product::Product;
use crate::error::{OrderError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory order repository.
///
/// Uses `Arc<RwLock<HashMap<Uuid, Order>>>` to allow shared concurrent access.
/// Ideal for testing or running the CLI driver without a database.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn insert(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id(), order);
        Ok(())
    }

    async fn update(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id()) {
            return Err(OrderError::NotFound(format!("order {}", order.id())));
        }
        orders.insert(order.id(), order);
        Ok(())
    }
}

/// A thread-safe in-memory product catalog.
///
/// Products are seeded through inherent methods; the `ProductRepository` port
/// only exposes lookup, matching what the core needs from the catalog.
#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }
}

/// A thread-safe in-memory customer registry.
#[derive(Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let map = customers.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            customers: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn insert(&self, customer: Customer) {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id.clone(), customer);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get_customer_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(id).cloned())
    }
}

/// In-process event manager: a named registry of deferred handlers.
///
/// `dispatch` removes the handlers registered under the event before running
/// them, so each registration fires at most once.
#[derive(Default, Clone)]
pub struct InMemoryEventManager {
    handlers: Arc<RwLock<HashMap<String, Vec<EventHandler>>>>,
}

impl InMemoryEventManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventManager for InMemoryEventManager {
    async fn add(&self, event: &str, handler: EventHandler) {
        let mut handlers = self.handlers.write().await;
        handlers.entry(event.to_string()).or_default().push(handler);
    }

    async fn dispatch(&self, event: &str) {
        let registered = {
            let mut handlers = self.handlers.write().await;
            handlers.remove(event)
        };
        if let Some(registered) = registered {
            for handler in registered {
                handler().await;
            }
        }
    }
}
