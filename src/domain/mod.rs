//! Domain layer: the order aggregate, catalog entities and the ports the
//! application layer orchestrates against.

pub mod customer;
pub mod order;
pub mod ports;
pub mod product;
