use crate::application::dtos::{CheckoutDto, OrderDto, PaymentMethod};
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Deterministic stand-in for the external PIX payment rail.
///
/// Issues a fresh payment reference and a copy-paste QR payload for every
/// charge. Used by the CLI driver and tests; a production deployment swaps in
/// a real gateway client behind the same `PaymentGateway` port.
#[derive(Default, Clone)]
pub struct PixSandboxGateway;

impl PixSandboxGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for PixSandboxGateway {
    async fn execute(&self, order: &OrderDto, method: PaymentMethod) -> Result<CheckoutDto> {
        let rail = match method {
            PaymentMethod::Pix => "PIX",
        };
        Ok(CheckoutDto {
            order_id: order.id,
            payment_method: method,
            payment_reference: Uuid::new_v4().to_string(),
            qr_code: format!("{rail}|{}|{}", order.id, order.total),
        })
    }
}
