use crate::domain::product::{Price, Product};
use crate::error::OrderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a positive item quantity.
///
/// Ensures that line items can never carry a zero or missing quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub fn new(value: u32) -> Result<Self, OrderError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(OrderError::ValidationError(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = OrderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    AwaitingPayment,
    Paid,
}

/// A line item inside an order.
///
/// Carries a snapshot of the product at the time it was added, so later
/// catalog changes do not rewrite orders already taken.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Price,
    pub quantity: Quantity,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price.value() * Decimal::from(self.quantity.value())
    }
}

/// The order aggregate: a customer purchase holding line items and a status.
///
/// Items and status are only mutated through the aggregate's own methods, and
/// status transitions are one-directional: Open -> AwaitingPayment -> Paid.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    id: Uuid,
    customer_id: Option<String>,
    items: Vec<OrderItem>,
    status: OrderStatus,
}

impl Order {
    /// Opens a new, empty order. Guest checkouts pass `None`.
    pub fn open(customer_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            items: Vec::new(),
            status: OrderStatus::Open,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Appends a line item for `product`. Only legal while the order is open.
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) -> Result<(), OrderError> {
        if self.status != OrderStatus::Open {
            return Err(OrderError::ValidationError(
                "Items can only be added to an open order".to_string(),
            ));
        }
        self.items.push(OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
        });
        Ok(())
    }

    /// Freezes the item set and moves the order to `AwaitingPayment`.
    pub fn begin_payment(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Open {
            return Err(OrderError::ValidationError(
                "Only an open order can move to awaiting payment".to_string(),
            ));
        }
        self.status = OrderStatus::AwaitingPayment;
        Ok(())
    }

    /// Marks a payment-pending order as paid.
    pub fn confirm_payment(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::AwaitingPayment {
            return Err(OrderError::ValidationError(
                "Only an order awaiting payment can be confirmed as paid".to_string(),
            ));
        }
        self.status = OrderStatus::Paid;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn burger() -> Product {
        Product::new("p-1", "Burger", Price::new(dec!(9.90)).unwrap())
    }

    #[test]
    fn test_quantity_validation() {
        assert!(Quantity::new(1).is_ok());
        assert!(matches!(
            Quantity::new(0),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn test_open_order_is_empty() {
        let order = Order::open(Some("c-1".to_string()));
        assert_eq!(order.status(), OrderStatus::Open);
        assert!(order.items().is_empty());
        assert_eq!(order.customer_id(), Some("c-1"));
        assert_eq!(order.total(), Decimal::ZERO);
    }

    #[test]
    fn test_guest_order_has_no_customer() {
        let order = Order::open(None);
        assert_eq!(order.customer_id(), None);
    }

    #[test]
    fn test_add_item_and_total() {
        let mut order = Order::open(None);
        order.add_item(&burger(), Quantity::new(2).unwrap()).unwrap();
        order.add_item(&burger(), Quantity::ONE).unwrap();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].subtotal(), dec!(19.80));
        assert_eq!(order.total(), dec!(29.70));
    }

    #[test]
    fn test_repeated_products_stay_separate_items() {
        let mut order = Order::open(None);
        order.add_item(&burger(), Quantity::ONE).unwrap();
        order.add_item(&burger(), Quantity::ONE).unwrap();

        // Two quantity-1 items, not one quantity-2 item.
        assert_eq!(order.items().len(), 2);
        assert!(order.items().iter().all(|i| i.quantity == Quantity::ONE));
    }

    #[test]
    fn test_add_item_rejected_after_begin_payment() {
        let mut order = Order::open(None);
        order.begin_payment().unwrap();

        let result = order.add_item(&burger(), Quantity::ONE);
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
        assert!(order.items().is_empty());
    }

    #[test]
    fn test_status_transitions_are_one_directional() {
        let mut order = Order::open(None);
        order.begin_payment().unwrap();
        assert_eq!(order.status(), OrderStatus::AwaitingPayment);

        // A second begin_payment must not succeed.
        assert!(order.begin_payment().is_err());

        order.confirm_payment().unwrap();
        assert_eq!(order.status(), OrderStatus::Paid);

        // Paid is terminal.
        assert!(order.confirm_payment().is_err());
        assert!(order.begin_payment().is_err());
    }

    #[test]
    fn test_confirm_payment_requires_awaiting_payment() {
        let mut order = Order::open(None);
        assert!(matches!(
            order.confirm_payment(),
            Err(OrderError::ValidationError(_))
        ));
        assert_eq!(order.status(), OrderStatus::Open);
    }
}
