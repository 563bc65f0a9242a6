//! Application layer containing the use cases that orchestrate repositories,
//! the payment gateway and the order aggregate. Each use case is the unit of
//! business logic invoked by a driver (CLI here, HTTP controllers elsewhere).

pub mod add_order_item;
pub mod checkout_order;
pub mod confirm_payment;
pub mod dtos;
pub mod open_order;
