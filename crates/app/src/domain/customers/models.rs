//! Customer Models

use jiff::Timestamp;

pub use venda::{
    checkout::{AddressUuid, PaymentMethodUuid},
    principal::CustomerUuid,
};

/// Customer Model
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Customer Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub name: String,
}

/// Delivery Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub uuid: AddressUuid,
    pub customer: CustomerUuid,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub created_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Delivery Address Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub uuid: AddressUuid,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
}

/// Payment Method Model
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub customer: CustomerUuid,
    pub name: String,
    pub details: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Payment Method Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub name: String,
    pub details: String,
}
