use crate::application::confirm_payment::ConfirmPaymentUseCase;
use crate::application::dtos::{CheckoutDto, OrderDto, PaymentMethod};
use crate::domain::order::{Order, Quantity};
use crate::domain::ports::{
    CustomerRepository, CustomerRepositoryRef, EventManager, EventManagerRef, OrderRepository,
    OrderRepositoryRef, PaymentGateway, PaymentGatewayRef, ProductRepository,
    ProductRepositoryRef,
};
use crate::domain::product::Product;
use crate::error::{OrderError, Result};
use uuid::Uuid;

/// Event name under which a checkout registers its payment confirmation.
pub fn paid_event(order_id: Uuid) -> String {
    format!("order_paid:{order_id}")
}

/// Builds an order from a list of product ids, charges it through the payment
/// gateway and persists it only after the gateway accepts the charge. A failed
/// gateway call leaves no trace in storage.
pub struct CheckoutOrderUseCase {
    order_repository: OrderRepositoryRef,
    customer_repository: CustomerRepositoryRef,
    product_repository: ProductRepositoryRef,
    payment_gateway: PaymentGatewayRef,
    event_manager: EventManagerRef,
}

impl CheckoutOrderUseCase {
    pub fn new(
        order_repository: OrderRepositoryRef,
        customer_repository: CustomerRepositoryRef,
        product_repository: ProductRepositoryRef,
        payment_gateway: PaymentGatewayRef,
        event_manager: EventManagerRef,
    ) -> Self {
        Self {
            order_repository,
            customer_repository,
            product_repository,
            payment_gateway,
            event_manager,
        }
    }

    async fn validate_customer_id(&self, customer_id: Option<&str>) -> Result<()> {
        let Some(id) = customer_id else {
            return Ok(());
        };
        self.customer_repository
            .get_customer_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("customer {id}")))?;
        Ok(())
    }

    /// Resolves every product id, aborting on the first miss.
    async fn fetch_products(&self, product_ids: &[String]) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            let product = self
                .product_repository
                .find_by_id(product_id)
                .await?
                .ok_or_else(|| OrderError::NotFound(format!("product {product_id}")))?;
            products.push(product);
        }
        Ok(products)
    }

    pub async fn execute(
        &self,
        customer_id: Option<String>,
        product_ids: Vec<String>,
    ) -> Result<CheckoutDto> {
        self.validate_customer_id(customer_id.as_deref()).await?;
        let products = self.fetch_products(&product_ids).await?;

        let mut order = Order::open(customer_id);
        for product in &products {
            // One quantity-1 item per requested id; repeats stay separate.
            order.add_item(product, Quantity::ONE)?;
        }
        order.begin_payment()?;

        let checkout = self
            .payment_gateway
            .execute(&OrderDto::from_entity(&order), PaymentMethod::Pix)
            .await?;

        self.order_repository.insert(order.clone()).await?;
        self.register_payment_confirmation(order.id()).await;
        tracing::info!(
            order_id = %order.id(),
            items = order.items().len(),
            total = %order.total(),
            "checkout accepted"
        );

        Ok(checkout)
    }

    /// Registers the deferred `AwaitingPayment -> Paid` transition, to run when
    /// the gateway's confirmation event for this order is dispatched.
    async fn register_payment_confirmation(&self, order_id: Uuid) {
        let confirm = ConfirmPaymentUseCase::new(self.order_repository.clone());
        self.event_manager
            .add(
                &paid_event(order_id),
                Box::new(move || {
                    let confirm = confirm.clone();
                    Box::pin(async move {
                        if let Err(e) = confirm.execute(order_id).await {
                            tracing::warn!(%order_id, error = %e, "payment confirmation failed");
                        }
                    })
                }),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Customer;
    use crate::domain::order::OrderStatus;
    use crate::domain::ports::{EventManager, OrderRepository, PaymentGateway};
    use crate::domain::product::Price;
    use crate::infrastructure::in_memory::{
        InMemoryCustomerRepository, InMemoryEventManager, InMemoryOrderRepository,
        InMemoryProductRepository,
    };
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and returns a canned confirmation.
    struct RecordingGateway {
        calls: AtomicUsize,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn execute(&self, order: &OrderDto, method: PaymentMethod) -> Result<CheckoutDto> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CheckoutDto {
                order_id: order.id,
                payment_method: method,
                payment_reference: "ref-1".to_string(),
                qr_code: "qr-1".to_string(),
            })
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl PaymentGateway for FailingGateway {
        async fn execute(&self, _order: &OrderDto, _method: PaymentMethod) -> Result<CheckoutDto> {
            Err(OrderError::GatewayError("card declined".to_string()))
        }
    }

    struct Fixture {
        orders: Arc<InMemoryOrderRepository>,
        events: Arc<InMemoryEventManager>,
        gateway: Arc<RecordingGateway>,
    }

    fn build_use_case(fx: &Fixture, gateway: PaymentGatewayRef) -> CheckoutOrderUseCase {
        CheckoutOrderUseCase::new(
            fx.orders.clone(),
            Arc::new(InMemoryCustomerRepository::with_customers(vec![
                Customer::new("c-1", "Ana"),
            ])),
            Arc::new(InMemoryProductRepository::with_products(vec![
                Product::new("p-1", "Burger", Price::new(dec!(9.90)).unwrap()),
                Product::new("p-2", "Fries", Price::new(dec!(4.25)).unwrap()),
            ])),
            gateway,
            fx.events.clone(),
        )
    }

    fn fixture_with_gateway(gateway: PaymentGatewayRef) -> (Fixture, CheckoutOrderUseCase) {
        let fx = Fixture {
            orders: Arc::new(InMemoryOrderRepository::new()),
            events: Arc::new(InMemoryEventManager::new()),
            gateway: Arc::new(RecordingGateway::new()),
        };
        let use_case = build_use_case(&fx, gateway);
        (fx, use_case)
    }

    fn fixture() -> (Fixture, CheckoutOrderUseCase) {
        let fx = Fixture {
            orders: Arc::new(InMemoryOrderRepository::new()),
            events: Arc::new(InMemoryEventManager::new()),
            gateway: Arc::new(RecordingGateway::new()),
        };
        let use_case = build_use_case(&fx, fx.gateway.clone());
        (fx, use_case)
    }

    #[tokio::test]
    async fn test_checkout_persists_awaiting_payment_order() {
        let (fx, use_case) = fixture();

        let checkout = use_case
            .execute(
                Some("c-1".to_string()),
                vec!["p-1".to_string(), "p-2".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(checkout.payment_method, PaymentMethod::Pix);
        assert_eq!(checkout.payment_reference, "ref-1");

        let stored = fx
            .orders
            .find_by_id(checkout.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), OrderStatus::AwaitingPayment);
        assert_eq!(stored.items().len(), 2);
        assert!(stored.items().iter().all(|i| i.quantity == Quantity::ONE));
    }

    #[tokio::test]
    async fn test_repeated_product_ids_become_repeated_items() {
        let (fx, use_case) = fixture();

        let checkout = use_case
            .execute(None, vec!["p-1".to_string(), "p-1".to_string()])
            .await
            .unwrap();

        let stored = fx
            .orders
            .find_by_id(checkout.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.items().len(), 2);
        assert_eq!(stored.total(), dec!(19.80));
    }

    #[tokio::test]
    async fn test_empty_product_list_still_reaches_gateway() {
        let (fx, use_case) = fixture();

        let checkout = use_case.execute(None, vec![]).await.unwrap();
        assert_eq!(fx.gateway.calls(), 1);

        let stored = fx
            .orders
            .find_by_id(checkout.order_id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.items().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_aborts_before_gateway() {
        let (fx, use_case) = fixture();

        let result = use_case
            .execute(None, vec!["p-1".to_string(), "missing".to_string()])
            .await;

        assert!(matches!(result, Err(OrderError::NotFound(_))));
        assert_eq!(fx.gateway.calls(), 0);
        assert_eq!(fx.orders.len().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_aborts_before_gateway() {
        let (fx, use_case) = fixture();

        let result = use_case
            .execute(Some("missing".to_string()), vec!["p-1".to_string()])
            .await;

        assert!(matches!(result, Err(OrderError::NotFound(_))));
        assert_eq!(fx.gateway.calls(), 0);
        assert_eq!(fx.orders.len().await, 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_persists_nothing() {
        let (fx, use_case) = fixture_with_gateway(Arc::new(FailingGateway));

        let result = use_case.execute(None, vec!["p-1".to_string()]).await;

        assert!(matches!(result, Err(OrderError::GatewayError(_))));
        assert_eq!(fx.orders.len().await, 0);
    }

    #[tokio::test]
    async fn test_dispatching_paid_event_marks_order_paid() {
        let (fx, use_case) = fixture();

        let checkout = use_case.execute(None, vec!["p-1".to_string()]).await.unwrap();
        fx.events.dispatch(&paid_event(checkout.order_id)).await;

        let stored = fx
            .orders
            .find_by_id(checkout.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), OrderStatus::Paid);

        // Re-dispatch is a no-op: handlers are consumed and Paid is terminal.
        fx.events.dispatch(&paid_event(checkout.order_id)).await;
        let stored = fx
            .orders
            .find_by_id(checkout.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), OrderStatus::Paid);
    }
}
