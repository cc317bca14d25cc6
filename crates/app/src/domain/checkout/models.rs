//! Checkout Models

pub use venda::checkout::{AddressUuid, PaymentMethodUuid};

/// Checkout Request Model
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethodUuid,

    /// Delivery address; the most recent usable one when omitted.
    pub address: Option<AddressUuid>,
}
